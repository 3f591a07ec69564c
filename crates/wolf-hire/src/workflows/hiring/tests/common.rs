use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::workflows::hiring::{Applicant, Command, CommandKind, HiringManager, Position};

/// Two positions; Barista holds ids 1 and 4, Tutor holds id 2.
pub(super) const SAMPLE_FILE: &str = "\
# Barista,10,15
* 1,Submitted,Ada,Lovelace,alovelace,,
* 4,Reviewing,Alan,Turing,aturing,grace,
# Tutor,20,12
* 2,Rejected,Grace,Hopper,ghopper,,Duplicate
";

pub(super) fn command(kind: CommandKind, payload: Option<&str>) -> Command {
    Command::new(kind, payload.map(str::to_string)).expect("valid command")
}

pub(super) fn simple(kind: CommandKind) -> Command {
    command(kind, None)
}

pub(super) fn assign(reviewer: &str) -> Command {
    command(CommandKind::Assign, Some(reviewer))
}

pub(super) fn applicant(first_name: &str, surname: &str, unity_id: &str) -> Applicant {
    Applicant::new(first_name, surname, unity_id).expect("valid applicant")
}

pub(super) fn barista() -> Position {
    Position::new("Barista", 10, 15).expect("valid position")
}

/// Manager with an active Barista position holding applications 1 and 2.
pub(super) fn seeded_manager() -> HiringManager {
    let mut manager = HiringManager::new();
    manager
        .add_new_position("Barista", 10, 15)
        .expect("position added");
    manager
        .add_application_to_position("Ada", "Lovelace", "alovelace")
        .expect("first application");
    manager
        .add_application_to_position("Alan", "Turing", "aturing")
        .expect("second application");
    manager
}

pub(super) fn temp_path(label: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "wolf-hire-{label}-{}-{unique}.txt",
        std::process::id()
    ))
}

pub(super) fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

pub(super) fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

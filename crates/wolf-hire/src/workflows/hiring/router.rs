use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::application::Application;
use super::command::{Command, CommandKind};
use super::domain::{ApplicationId, ApplicationState};
use super::error::HiringError;
use super::manager::{HiringManager, ManagerError};
use super::position::PositionError;

/// Shared state behind the hiring routes. The manager mutex serializes every command so a
/// single application is never transitioned concurrently.
#[derive(Clone, Default)]
pub struct HiringState {
    pub manager: Arc<Mutex<HiringManager>>,
    pub storage: Option<PathBuf>,
}

impl HiringState {
    pub fn new(manager: HiringManager, storage: Option<PathBuf>) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
            storage,
        }
    }
}

/// Router builder exposing position and application endpoints.
pub fn hiring_router(state: HiringState) -> Router {
    Router::new()
        .route(
            "/api/v1/positions",
            get(list_positions_handler).post(create_position_handler),
        )
        .route("/api/v1/positions/active", put(activate_position_handler))
        .route(
            "/api/v1/applications",
            get(list_applications_handler).post(submit_handler),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler).delete(delete_handler),
        )
        .route(
            "/api/v1/applications/:application_id/commands",
            post(command_handler),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct PositionSummary {
    pub name: String,
    pub hours_per_week: u32,
    pub pay_rate: u32,
    pub applications: usize,
}

#[derive(Debug, Deserialize)]
pub struct NewPositionRequest {
    pub name: String,
    pub hours_per_week: u32,
    pub pay_rate: u32,
}

#[derive(Debug, Deserialize)]
pub struct ActivatePositionRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationListQuery {
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SubmissionRequest {
    pub first_name: String,
    pub surname: String,
    pub unity_id: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub payload: Option<String>,
}

/// Parse a listing filter; "All" (or nothing) means no filter.
pub fn parse_state_filter(raw: Option<&str>) -> Result<Option<ApplicationState>, HiringError> {
    match raw.map(str::trim) {
        None | Some("") | Some("All") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

pub(crate) async fn list_positions_handler(State(state): State<HiringState>) -> Response {
    let manager = match lock(&state) {
        Ok(manager) => manager,
        Err(response) => return response,
    };

    let positions: Vec<PositionSummary> = manager
        .positions()
        .iter()
        .map(|position| PositionSummary {
            name: position.name().to_string(),
            hours_per_week: position.hours_per_week(),
            pay_rate: position.pay_rate(),
            applications: position.applications().len(),
        })
        .collect();

    let payload = json!({
        "positions": positions,
        "active": manager.active_position_name(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn create_position_handler(
    State(state): State<HiringState>,
    Json(request): Json<NewPositionRequest>,
) -> Response {
    let mut manager = match lock(&state) {
        Ok(manager) => manager,
        Err(response) => return response,
    };

    match manager.add_new_position(&request.name, request.hours_per_week, request.pay_rate) {
        Ok(()) => {
            persist(&state, &manager);
            let payload = json!({ "active": manager.active_position_name() });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn activate_position_handler(
    State(state): State<HiringState>,
    Json(request): Json<ActivatePositionRequest>,
) -> Response {
    let mut manager = match lock(&state) {
        Ok(manager) => manager,
        Err(response) => return response,
    };

    match manager.load_position(&request.name) {
        Ok(()) => (StatusCode::OK, Json(json!({ "active": request.name }))).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn list_applications_handler(
    State(state): State<HiringState>,
    Query(query): Query<ApplicationListQuery>,
) -> Response {
    let filter = match parse_state_filter(query.state.as_deref()) {
        Ok(filter) => filter,
        Err(err) => return error_response(&err.into()),
    };
    let manager = match lock(&state) {
        Ok(manager) => manager,
        Err(response) => return response,
    };

    match manager.application_rows(filter) {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn submit_handler(
    State(state): State<HiringState>,
    Json(request): Json<SubmissionRequest>,
) -> Response {
    let mut manager = match lock(&state) {
        Ok(manager) => manager,
        Err(response) => return response,
    };

    let submitted = manager
        .add_application_to_position(&request.first_name, &request.surname, &request.unity_id)
        .map(|id| manager.application_by_id(id).map(Application::record));

    match submitted {
        Ok(Some(record)) => {
            persist(&state, &manager);
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Ok(None) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn application_handler(
    State(state): State<HiringState>,
    Path(application_id): Path<u32>,
) -> Response {
    let manager = match lock(&state) {
        Ok(manager) => manager,
        Err(response) => return response,
    };

    let id = ApplicationId(application_id);
    match manager.application_by_id(id) {
        Some(application) => (StatusCode::OK, Json(application.record())).into_response(),
        None => error_response(&PositionError::ApplicationNotFound(id).into()),
    }
}

pub(crate) async fn delete_handler(
    State(state): State<HiringState>,
    Path(application_id): Path<u32>,
) -> Response {
    let mut manager = match lock(&state) {
        Ok(manager) => manager,
        Err(response) => return response,
    };

    if manager
        .delete_application_by_id(ApplicationId(application_id))
        .is_some()
    {
        persist(&state, &manager);
    }
    StatusCode::NO_CONTENT.into_response()
}

pub(crate) async fn command_handler(
    State(state): State<HiringState>,
    Path(application_id): Path<u32>,
    Json(request): Json<CommandRequest>,
) -> Response {
    let command = match request
        .command
        .parse::<CommandKind>()
        .and_then(|kind| Command::new(kind, request.payload))
    {
        Ok(command) => command,
        Err(err) => return error_response(&err.into()),
    };

    let mut manager = match lock(&state) {
        Ok(manager) => manager,
        Err(response) => return response,
    };

    let updated = manager
        .execute_command(ApplicationId(application_id), &command)
        .map(Application::record);
    match updated {
        Ok(record) => {
            persist(&state, &manager);
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

fn lock(state: &HiringState) -> Result<MutexGuard<'_, HiringManager>, Response> {
    state.manager.lock().map_err(|_| {
        let payload = json!({ "error": "hiring state unavailable" });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
    })
}

fn persist(state: &HiringState, manager: &HiringManager) {
    if let Some(path) = &state.storage {
        if let Err(err) = manager.save_positions_to_file(path) {
            warn!(path = %path.display(), %err, "failed to persist positions");
        }
    }
}

pub fn status_for(error: &ManagerError) -> StatusCode {
    match error {
        ManagerError::NoActivePosition | ManagerError::DuplicatePosition(_) => StatusCode::CONFLICT,
        ManagerError::PositionNotFound(_)
        | ManagerError::Position(PositionError::ApplicationNotFound(_)) => StatusCode::NOT_FOUND,
        ManagerError::Position(PositionError::InvalidPosition(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ManagerError::Position(PositionError::Hiring(err)) => match err {
            HiringError::IllegalTransition { .. } | HiringError::DuplicateIdentifier(_) => {
                StatusCode::CONFLICT
            }
            HiringError::InvalidCommand(_)
            | HiringError::InvalidReason { .. }
            | HiringError::InvalidIdentifier(_)
            | HiringError::InvalidField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        },
        ManagerError::Records(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: &ManagerError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (status_for(error), Json(payload)).into_response()
}

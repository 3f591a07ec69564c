use super::common::*;

use crate::workflows::hiring::{
    Application, ApplicationId, ApplicationRecord, ApplicationState, CommandKind, HiringError,
    IdAllocator, Note, TerminationReason,
};

#[test]
fn hire_then_terminate_keeps_latest_reviewer() {
    let mut allocator = IdAllocator::new();
    let mut application = Application::submit(
        &mut allocator,
        applicant("Ada", "Lovelace", "alovelace"),
    );
    assert_eq!(application.id(), ApplicationId(1));
    assert_eq!(application.state(), ApplicationState::Submitted);

    let fired = Some(Note::Termination(TerminationReason::Fired));
    let steps = [
        (assign("r1"), ApplicationState::Reviewing, "r1", None),
        (simple(CommandKind::Schedule), ApplicationState::Interviewing, "r1", None),
        (assign("r2"), ApplicationState::Reviewing, "r2", None),
        (simple(CommandKind::Schedule), ApplicationState::Interviewing, "r2", None),
        (simple(CommandKind::Process), ApplicationState::Processing, "r2", None),
        (simple(CommandKind::Hire), ApplicationState::Hired, "r2", None),
        (
            command(CommandKind::Terminate, Some("Fired")),
            ApplicationState::Inactive,
            "r2",
            fired,
        ),
    ];

    for (step, state, reviewer, note) in steps {
        application.apply(&step).expect("legal step");
        assert_eq!(application.state(), state, "{}", step.kind());
        assert_eq!(application.reviewer(), Some(reviewer), "{}", step.kind());
        assert_eq!(application.note(), note, "{}", step.kind());
    }
}

#[test]
fn unknown_rejection_reason_leaves_application_untouched() {
    let mut allocator = IdAllocator::new();
    let mut application = Application::submit(
        &mut allocator,
        applicant("Ada", "Lovelace", "alovelace"),
    );
    application.apply(&assign("grace")).expect("assign");
    let before = application.clone();

    let err = application
        .apply(&command(CommandKind::Reject, Some("Other")))
        .expect_err("reason outside vocabulary");
    assert_eq!(
        err,
        HiringError::InvalidReason {
            command: CommandKind::Reject,
            reason: "Other".to_string(),
        }
    );
    assert_eq!(application, before);
}

#[test]
fn illegal_command_reports_state_and_command() {
    let mut allocator = IdAllocator::new();
    let mut application = Application::submit(
        &mut allocator,
        applicant("Ada", "Lovelace", "alovelace"),
    );

    let err = application
        .apply(&simple(CommandKind::Hire))
        .expect_err("hire needs processing first");
    assert_eq!(
        err,
        HiringError::IllegalTransition {
            state: ApplicationState::Submitted,
            command: CommandKind::Hire,
        }
    );
    assert_eq!(application.state(), ApplicationState::Submitted);
}

fn record(id: i64, state: &str, reviewer: &str, note: &str) -> ApplicationRecord {
    ApplicationRecord {
        id,
        state: state.to_string(),
        first_name: "Grace".to_string(),
        surname: "Hopper".to_string(),
        unity_id: "ghopper".to_string(),
        reviewer: reviewer.to_string(),
        note: note.to_string(),
    }
}

#[test]
fn rejected_record_with_reviewer_is_refused_before_allocation() {
    let mut allocator = IdAllocator::new();
    let err = Application::from_record(
        &mut allocator,
        &record(3, "Rejected", "jdoe", "Duplicate"),
    )
    .expect_err("rejected applications carry no reviewer");

    assert!(matches!(err, HiringError::InvalidField(_)));
    assert_eq!(allocator.peek(), 1);
}

#[test]
fn records_restore_and_advance_the_allocator() {
    let mut allocator = IdAllocator::new();
    let restored = Application::from_record(
        &mut allocator,
        &record(7, "Interviewing", "jdoe", ""),
    )
    .expect("valid record");

    assert_eq!(restored.id(), ApplicationId(7));
    assert_eq!(restored.reviewer(), Some("jdoe"));
    assert_eq!(restored.note(), None);
    assert_eq!(allocator.peek(), 8);

    let mut fresh = IdAllocator::new();
    let copy = Application::from_record(&mut fresh, &restored.record()).expect("round trip");
    assert_eq!(copy, restored);
}

#[test]
fn records_need_a_known_state_and_positive_id() {
    let mut allocator = IdAllocator::new();
    assert!(matches!(
        Application::from_record(&mut allocator, &record(2, "Pending", "", "")),
        Err(HiringError::InvalidField(_))
    ));
    assert_eq!(
        Application::from_record(&mut allocator, &record(0, "Submitted", "", "")),
        Err(HiringError::InvalidIdentifier(0))
    );
    assert!(matches!(
        Application::from_record(&mut allocator, &record(2, "Inactive", "jdoe", "Duplicate")),
        Err(HiringError::InvalidField(_))
    ));
    assert_eq!(allocator.peek(), 1);
}

#[test]
fn applicant_fields_must_be_present() {
    assert!(matches!(
        crate::workflows::hiring::Applicant::new("", "Lovelace", "alovelace"),
        Err(HiringError::InvalidField(_))
    ));
    assert!(matches!(
        crate::workflows::hiring::Applicant::new("Ada", "Lovelace", ""),
        Err(HiringError::InvalidField(_))
    ));
}

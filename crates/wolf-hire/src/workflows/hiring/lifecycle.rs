use super::command::{Command, CommandKind};
use super::domain::{
    is_clean_text, text_field, ApplicationState, Note, RejectionReason, TerminationReason,
};
use super::error::HiringError;

/// The mutable part of an application: where it is in the workflow, who is reviewing it, and
/// the reason attached to a rejection or termination.
///
/// A `Lifecycle` obtained from [`Lifecycle::new`] or [`Lifecycle::apply`] always satisfies the
/// field rules of its state:
///
/// | state        | reviewer | note                 |
/// |--------------|----------|----------------------|
/// | Submitted    | absent   | absent               |
/// | Rejected     | absent   | rejection reason     |
/// | Reviewing    | present  | absent               |
/// | Interviewing | present  | absent               |
/// | Processing   | present  | absent               |
/// | Hired        | present  | absent               |
/// | Inactive     | present  | termination reason   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifecycle {
    state: ApplicationState,
    reviewer: Option<String>,
    note: Option<Note>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::submitted()
    }
}

impl Lifecycle {
    /// Entry point for freshly submitted applications.
    pub const fn submitted() -> Self {
        Self {
            state: ApplicationState::Submitted,
            reviewer: None,
            note: None,
        }
    }

    pub fn new(
        state: ApplicationState,
        reviewer: Option<String>,
        note: Option<Note>,
    ) -> Result<Self, HiringError> {
        let lifecycle = Self {
            state,
            reviewer,
            note,
        };
        lifecycle.validate()?;
        Ok(lifecycle)
    }

    pub fn state(&self) -> ApplicationState {
        self.state
    }

    pub fn reviewer(&self) -> Option<&str> {
        self.reviewer.as_deref()
    }

    pub fn note(&self) -> Option<Note> {
        self.note
    }

    fn validate(&self) -> Result<(), HiringError> {
        match &self.reviewer {
            Some(reviewer) if !is_clean_text(reviewer) => {
                return Err(HiringError::field(
                    "reviewer must be a non-blank single line without surrounding spaces",
                ));
            }
            Some(_) if !self.state.requires_reviewer() => {
                return Err(HiringError::field(format!(
                    "{} applications cannot have a reviewer",
                    self.state
                )));
            }
            None if self.state.requires_reviewer() => {
                return Err(HiringError::field(format!(
                    "{} applications require a reviewer",
                    self.state
                )));
            }
            _ => {}
        }

        match (self.state, self.note) {
            (ApplicationState::Rejected, Some(Note::Rejection(_)))
            | (ApplicationState::Inactive, Some(Note::Termination(_))) => Ok(()),
            (ApplicationState::Rejected, _) => Err(HiringError::field(
                "rejected applications require a rejection reason",
            )),
            (ApplicationState::Inactive, _) => Err(HiringError::field(
                "inactive applications require a termination reason",
            )),
            (_, None) => Ok(()),
            (state, Some(note)) => Err(HiringError::field(format!(
                "{state} applications cannot carry the note '{note}'"
            ))),
        }
    }

    /// Compute the lifecycle that results from `command` without touching `self`.
    ///
    /// Reject and Terminate reasons are checked against their vocabulary before the current
    /// state is consulted, so a bad reason is reported as such even when the transition itself
    /// would also be illegal.
    pub fn apply(&self, command: &Command) -> Result<Self, HiringError> {
        let kind = command.kind();
        let payload = command.payload().unwrap_or_default();

        let reason = match kind {
            CommandKind::Reject => Some(Note::Rejection(
                RejectionReason::parse(payload).ok_or_else(|| invalid_reason(kind, payload))?,
            )),
            CommandKind::Terminate => Some(Note::Termination(
                TerminationReason::parse(payload).ok_or_else(|| invalid_reason(kind, payload))?,
            )),
            _ => None,
        };

        use ApplicationState::*;
        let next = match (self.state, kind) {
            (Submitted | Reviewing | Interviewing | Processing, CommandKind::Reject) => Self {
                state: Rejected,
                reviewer: None,
                note: reason,
            },
            (Submitted | Interviewing, CommandKind::Assign) => Self {
                state: Reviewing,
                reviewer: Some(text_field("reviewer", payload)?),
                note: self.note,
            },
            (Rejected, CommandKind::Resubmit) => Self::submitted(),
            (Reviewing, CommandKind::Return) => Self {
                state: Submitted,
                reviewer: None,
                note: self.note,
            },
            (Reviewing | Interviewing, CommandKind::Schedule) => self.moved_to(Interviewing),
            (Interviewing, CommandKind::Process) => self.moved_to(Processing),
            (Processing, CommandKind::Hire) => self.moved_to(Hired),
            (Hired, CommandKind::Terminate) => Self {
                state: Inactive,
                reviewer: self.reviewer.clone(),
                note: reason,
            },
            (state, command) => return Err(HiringError::IllegalTransition { state, command }),
        };

        next.validate()?;
        Ok(next)
    }

    fn moved_to(&self, state: ApplicationState) -> Self {
        Self {
            state,
            reviewer: self.reviewer.clone(),
            note: self.note,
        }
    }
}

fn invalid_reason(command: CommandKind, reason: &str) -> HiringError {
    HiringError::InvalidReason {
        command,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewer(name: &str) -> Option<String> {
        Some(name.to_string())
    }

    fn command(kind: CommandKind, payload: Option<&str>) -> Command {
        Command::new(kind, payload.map(str::to_string)).expect("valid command")
    }

    fn sample_command(kind: CommandKind) -> Command {
        match kind {
            CommandKind::Assign => command(kind, Some("jdoe")),
            CommandKind::Reject => command(kind, Some("Qualifications")),
            CommandKind::Terminate => command(kind, Some("Completed")),
            _ => command(kind, None),
        }
    }

    fn lifecycle_in(state: ApplicationState) -> Lifecycle {
        let (reviewer, note) = match state {
            ApplicationState::Submitted => (None, None),
            ApplicationState::Rejected => (None, Some(Note::Rejection(RejectionReason::Incomplete))),
            ApplicationState::Inactive => (
                reviewer("jdoe"),
                Some(Note::Termination(TerminationReason::Resigned)),
            ),
            _ => (reviewer("jdoe"), None),
        };
        Lifecycle::new(state, reviewer, note).expect("valid lifecycle")
    }

    fn is_legal(state: ApplicationState, kind: CommandKind) -> bool {
        use ApplicationState::*;
        matches!(
            (state, kind),
            (Submitted, CommandKind::Reject)
                | (Submitted, CommandKind::Assign)
                | (Rejected, CommandKind::Resubmit)
                | (Reviewing, CommandKind::Return)
                | (Reviewing, CommandKind::Reject)
                | (Reviewing, CommandKind::Schedule)
                | (Interviewing, CommandKind::Reject)
                | (Interviewing, CommandKind::Assign)
                | (Interviewing, CommandKind::Schedule)
                | (Interviewing, CommandKind::Process)
                | (Processing, CommandKind::Reject)
                | (Processing, CommandKind::Hire)
                | (Hired, CommandKind::Terminate)
        )
    }

    #[test]
    fn transitions_outside_the_table_are_illegal_and_leave_state_untouched() {
        for state in ApplicationState::ordered() {
            for kind in CommandKind::ordered() {
                let lifecycle = lifecycle_in(state);
                let result = lifecycle.apply(&sample_command(kind));
                if is_legal(state, kind) {
                    let next = result.expect("legal transition");
                    assert!(next.validate().is_ok());
                } else {
                    assert_eq!(
                        result,
                        Err(HiringError::IllegalTransition {
                            state,
                            command: kind
                        })
                    );
                    assert_eq!(lifecycle, lifecycle_in(state));
                }
            }
        }
    }

    #[test]
    fn field_rules_are_enforced_per_state() {
        let rejection = Some(Note::Rejection(RejectionReason::Positions));
        let termination = Some(Note::Termination(TerminationReason::Fired));

        assert!(Lifecycle::new(ApplicationState::Submitted, reviewer("a"), None).is_err());
        assert!(Lifecycle::new(ApplicationState::Submitted, None, rejection).is_err());
        assert!(Lifecycle::new(ApplicationState::Rejected, reviewer("a"), rejection).is_err());
        assert!(Lifecycle::new(ApplicationState::Rejected, None, None).is_err());
        assert!(Lifecycle::new(ApplicationState::Rejected, None, termination).is_err());
        assert!(Lifecycle::new(ApplicationState::Reviewing, None, None).is_err());
        assert!(Lifecycle::new(ApplicationState::Reviewing, reviewer(""), None).is_err());
        assert!(Lifecycle::new(ApplicationState::Hired, reviewer("a"), termination).is_err());
        assert!(Lifecycle::new(ApplicationState::Inactive, reviewer("a"), rejection).is_err());
        assert!(Lifecycle::new(ApplicationState::Inactive, None, termination).is_err());

        assert!(Lifecycle::new(ApplicationState::Rejected, None, rejection).is_ok());
        assert!(Lifecycle::new(ApplicationState::Inactive, reviewer("a"), termination).is_ok());
        assert!(Lifecycle::new(ApplicationState::Processing, reviewer("a"), None).is_ok());
    }

    #[test]
    fn reject_clears_reviewer_and_records_reason() {
        let next = lifecycle_in(ApplicationState::Processing)
            .apply(&command(CommandKind::Reject, Some("Duplicate")))
            .expect("reject from processing");
        assert_eq!(next.state(), ApplicationState::Rejected);
        assert_eq!(next.reviewer(), None);
        assert_eq!(next.note(), Some(Note::Rejection(RejectionReason::Duplicate)));
    }

    #[test]
    fn resubmit_clears_everything() {
        let next = lifecycle_in(ApplicationState::Rejected)
            .apply(&command(CommandKind::Resubmit, None))
            .expect("resubmit");
        assert_eq!(next, Lifecycle::submitted());
    }

    #[test]
    fn schedule_self_loop_keeps_fields() {
        let interviewing = lifecycle_in(ApplicationState::Interviewing);
        let next = interviewing
            .apply(&command(CommandKind::Schedule, None))
            .expect("reschedule");
        assert_eq!(next, interviewing);
    }

    #[test]
    fn assign_from_interviewing_replaces_reviewer() {
        let next = lifecycle_in(ApplicationState::Interviewing)
            .apply(&command(CommandKind::Assign, Some("asmith")))
            .expect("reassign");
        assert_eq!(next.state(), ApplicationState::Reviewing);
        assert_eq!(next.reviewer(), Some("asmith"));
    }

    #[test]
    fn assign_trims_reviewer_and_refuses_unstorable_names() {
        let next = Lifecycle::submitted()
            .apply(&command(CommandKind::Assign, Some("  jdoe  ")))
            .expect("padded reviewer");
        assert_eq!(next.reviewer(), Some("jdoe"));

        for bad in ["   ", "j\nd", "j\rd"] {
            assert!(
                matches!(
                    Lifecycle::submitted().apply(&command(CommandKind::Assign, Some(bad))),
                    Err(HiringError::InvalidField(_))
                ),
                "{bad:?}"
            );
            assert!(Lifecycle::new(ApplicationState::Reviewing, reviewer(bad), None).is_err());
        }
        assert!(Lifecycle::new(ApplicationState::Reviewing, reviewer(" jdoe"), None).is_err());
    }

    #[test]
    fn terminate_keeps_reviewer() {
        let next = lifecycle_in(ApplicationState::Hired)
            .apply(&command(CommandKind::Terminate, Some("Completed")))
            .expect("terminate");
        assert_eq!(next.state(), ApplicationState::Inactive);
        assert_eq!(next.reviewer(), Some("jdoe"));
        assert_eq!(
            next.note(),
            Some(Note::Termination(TerminationReason::Completed))
        );
    }

    #[test]
    fn reason_vocabulary_is_checked_before_state() {
        let submitted = Lifecycle::submitted();
        assert_eq!(
            submitted.apply(&command(CommandKind::Reject, Some("Other"))),
            Err(HiringError::InvalidReason {
                command: CommandKind::Reject,
                reason: "Other".to_string()
            })
        );
        // a termination reason is not a rejection reason
        assert!(matches!(
            submitted.apply(&command(CommandKind::Reject, Some("Fired"))),
            Err(HiringError::InvalidReason { .. })
        ));

        let inactive = lifecycle_in(ApplicationState::Inactive);
        assert!(matches!(
            inactive.apply(&command(CommandKind::Terminate, Some("Retired"))),
            Err(HiringError::InvalidReason { .. })
        ));
        assert!(matches!(
            inactive.apply(&command(CommandKind::Terminate, Some("Fired"))),
            Err(HiringError::IllegalTransition { .. })
        ));
    }
}

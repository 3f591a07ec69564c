use super::command::CommandKind;
use super::domain::{ApplicationId, ApplicationState};

/// Failures raised by the application lifecycle core.
///
/// Every variant is scoped to a single command or application; none of them leave a record
/// partially updated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HiringError {
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("cannot {command} an application that is {state}")]
    IllegalTransition {
        state: ApplicationState,
        command: CommandKind,
    },
    #[error("'{reason}' is not a valid reason to {command} an application")]
    InvalidReason { command: CommandKind, reason: String },
    #[error("application id must be a positive integer, got {0}")]
    InvalidIdentifier(i64),
    #[error("invalid application field: {0}")]
    InvalidField(String),
    #[error("application {0} already exists")]
    DuplicateIdentifier(ApplicationId),
}

impl HiringError {
    pub(crate) fn field(message: impl Into<String>) -> Self {
        Self::InvalidField(message.into())
    }
}

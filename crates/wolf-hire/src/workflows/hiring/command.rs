use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::HiringError;

/// Transition requested by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Assign,
    Reject,
    Resubmit,
    Return,
    Schedule,
    Process,
    Hire,
    Terminate,
}

impl CommandKind {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Assign,
            Self::Reject,
            Self::Resubmit,
            Self::Return,
            Self::Schedule,
            Self::Process,
            Self::Hire,
            Self::Terminate,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Reject => "reject",
            Self::Resubmit => "resubmit",
            Self::Return => "return",
            Self::Schedule => "schedule",
            Self::Process => "process",
            Self::Hire => "hire",
            Self::Terminate => "terminate",
        }
    }

    /// Assign carries a reviewer, Reject and Terminate carry a reason; nothing else takes a payload.
    pub const fn requires_payload(self) -> bool {
        matches!(self, Self::Assign | Self::Reject | Self::Terminate)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CommandKind {
    type Err = HiringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label() == normalized)
            .ok_or_else(|| HiringError::InvalidCommand(format!("unknown command '{value}'")))
    }
}

/// Immutable, validated transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    payload: Option<String>,
}

impl Command {
    pub fn new(kind: CommandKind, payload: Option<String>) -> Result<Self, HiringError> {
        match (kind.requires_payload(), payload.as_deref()) {
            (true, None) | (true, Some("")) => Err(HiringError::InvalidCommand(format!(
                "{kind} requires a non-empty payload"
            ))),
            (false, Some(_)) => Err(HiringError::InvalidCommand(format!(
                "{kind} does not accept a payload"
            ))),
            _ => Ok(Self { kind, payload }),
        }
    }

    /// Shorthand for the payload-free commands.
    pub fn simple(kind: CommandKind) -> Result<Self, HiringError> {
        Self::new(kind, None)
    }

    pub fn with_payload(kind: CommandKind, payload: impl Into<String>) -> Result<Self, HiringError> {
        Self::new(kind, Some(payload.into()))
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

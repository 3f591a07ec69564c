use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::HiringError;

/// Identifier assigned to an application, unique within its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u32);

impl ApplicationId {
    /// Validate a raw identifier, rejecting anything that is not a positive `u32`.
    pub fn new(raw: i64) -> Result<Self, HiringError> {
        match u32::try_from(raw) {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(HiringError::InvalidIdentifier(raw)),
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Position of an application within the hiring workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationState {
    Submitted,
    Rejected,
    Reviewing,
    Interviewing,
    Processing,
    Hired,
    Inactive,
}

impl ApplicationState {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Submitted,
            Self::Rejected,
            Self::Reviewing,
            Self::Interviewing,
            Self::Processing,
            Self::Hired,
            Self::Inactive,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::Rejected => "Rejected",
            Self::Reviewing => "Reviewing",
            Self::Interviewing => "Interviewing",
            Self::Processing => "Processing",
            Self::Hired => "Hired",
            Self::Inactive => "Inactive",
        }
    }

    /// Whether the state requires an assigned reviewer.
    pub const fn requires_reviewer(self) -> bool {
        !matches!(self, Self::Submitted | Self::Rejected)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Inactive)
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApplicationState {
    type Err = HiringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|state| state.label() == value)
            .ok_or_else(|| HiringError::field(format!("unknown state '{value}'")))
    }
}

/// Normalize a free-text field such as a name or reviewer: surrounding whitespace is dropped,
/// and values that end up empty or contain control characters are refused so they survive the
/// line-based positions file unchanged.
pub(crate) fn text_field(field: &str, value: &str) -> Result<String, HiringError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(HiringError::field(format!("{field} cannot be blank")));
    }
    if value.chars().any(char::is_control) {
        return Err(HiringError::field(format!(
            "{field} cannot contain control characters"
        )));
    }
    Ok(value.to_string())
}

/// Whether `value` is already in the form [`text_field`] produces.
pub(crate) fn is_clean_text(value: &str) -> bool {
    !value.is_empty() && value.trim() == value && !value.chars().any(char::is_control)
}

/// Reasons accepted when rejecting an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    Qualifications,
    Incomplete,
    Positions,
    Duplicate,
}

impl RejectionReason {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Qualifications,
            Self::Incomplete,
            Self::Positions,
            Self::Duplicate,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Qualifications => "Qualifications",
            Self::Incomplete => "Incomplete",
            Self::Positions => "Positions",
            Self::Duplicate => "Duplicate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|reason| reason.label() == value)
    }
}

/// Reasons accepted when ending a hire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    Completed,
    Resigned,
    Fired,
}

impl TerminationReason {
    pub const fn ordered() -> [Self; 3] {
        [Self::Completed, Self::Resigned, Self::Fired]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Resigned => "Resigned",
            Self::Fired => "Fired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|reason| reason.label() == value)
    }
}

/// The single free-standing note an application carries: why it was rejected or why the hire
/// ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    Rejection(RejectionReason),
    Termination(TerminationReason),
}

impl Note {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rejection(reason) => reason.label(),
            Self::Termination(reason) => reason.label(),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Note {
    type Err = HiringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(reason) = RejectionReason::parse(value) {
            return Ok(Self::Rejection(reason));
        }
        TerminationReason::parse(value)
            .map(Self::Termination)
            .ok_or_else(|| HiringError::field(format!("unknown note '{value}'")))
    }
}

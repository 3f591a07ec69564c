//! Hiring application lifecycle: typed states and commands, the transition table, per-position
//! application bookkeeping, and the on-disk record format.

pub mod allocator;
pub mod application;
pub mod command;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod position;
pub mod records;
pub mod router;

#[cfg(test)]
mod tests;

pub use allocator::IdAllocator;
pub use application::{Applicant, Application, ApplicationRecord};
pub use command::{Command, CommandKind};
pub use domain::{ApplicationId, ApplicationState, Note, RejectionReason, TerminationReason};
pub use error::HiringError;
pub use lifecycle::Lifecycle;
pub use manager::{ApplicationRow, HiringManager, ManagerError};
pub use position::{Position, PositionError, HOURS_PER_WEEK, PAY_RATE};
pub use records::{parse_positions, PositionReader, PositionWriter, RecordError};
pub use router::{hiring_router, status_for, HiringState};

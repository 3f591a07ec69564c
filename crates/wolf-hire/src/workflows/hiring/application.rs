use serde::{Deserialize, Serialize};
use tracing::debug;

use super::allocator::IdAllocator;
use super::command::Command;
use super::domain::{text_field, ApplicationId, ApplicationState, Note};
use super::error::HiringError;
use super::lifecycle::Lifecycle;

/// Identity details captured once when an application is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    first_name: String,
    surname: String,
    unity_id: String,
}

impl Applicant {
    pub fn new(
        first_name: &str,
        surname: &str,
        unity_id: &str,
    ) -> Result<Self, HiringError> {
        Ok(Self {
            first_name: text_field("first name", first_name)?,
            surname: text_field("surname", surname)?,
            unity_id: text_field("unity id", unity_id)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn unity_id(&self) -> &str {
        &self.unity_id
    }
}

/// Flat seven-field form of an application, in storage order. Absent reviewer and note are
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: i64,
    pub state: String,
    pub first_name: String,
    pub surname: String,
    pub unity_id: String,
    #[serde(default)]
    pub reviewer: String,
    #[serde(default)]
    pub note: String,
}

/// One applicant's progress through the hiring workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    id: ApplicationId,
    applicant: Applicant,
    lifecycle: Lifecycle,
}

impl Application {
    /// Create a freshly submitted application with the next identifier from `allocator`.
    pub fn submit(allocator: &mut IdAllocator, applicant: Applicant) -> Self {
        Self {
            id: allocator.next_id(),
            applicant,
            lifecycle: Lifecycle::submitted(),
        }
    }

    /// Rebuild an application whose identifier was assigned earlier. The allocator is only
    /// reconciled once everything else has been validated.
    pub fn restore(
        allocator: &mut IdAllocator,
        id: i64,
        applicant: Applicant,
        lifecycle: Lifecycle,
    ) -> Result<Self, HiringError> {
        let id = allocator.reconcile(id)?;
        Ok(Self {
            id,
            applicant,
            lifecycle,
        })
    }

    /// Rebuild an application from its seven stored fields.
    pub fn from_record(
        allocator: &mut IdAllocator,
        record: &ApplicationRecord,
    ) -> Result<Self, HiringError> {
        let applicant = Applicant::new(
            record.first_name.as_str(),
            record.surname.as_str(),
            record.unity_id.as_str(),
        )?;
        let state: ApplicationState = record.state.parse()?;
        let reviewer = non_empty(&record.reviewer).map(str::to_string);
        let note = non_empty(&record.note)
            .map(str::parse::<Note>)
            .transpose()?;
        let lifecycle = Lifecycle::new(state, reviewer, note)?;
        Self::restore(allocator, record.id, applicant, lifecycle)
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn applicant(&self) -> &Applicant {
        &self.applicant
    }

    pub fn first_name(&self) -> &str {
        self.applicant.first_name()
    }

    pub fn surname(&self) -> &str {
        self.applicant.surname()
    }

    pub fn unity_id(&self) -> &str {
        self.applicant.unity_id()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn state(&self) -> ApplicationState {
        self.lifecycle.state()
    }

    pub fn reviewer(&self) -> Option<&str> {
        self.lifecycle.reviewer()
    }

    pub fn note(&self) -> Option<Note> {
        self.lifecycle.note()
    }

    /// Apply a command, leaving the application untouched when the command is refused.
    pub fn apply(&mut self, command: &Command) -> Result<(), HiringError> {
        let next = self.lifecycle.apply(command)?;
        debug!(
            id = %self.id,
            command = %command.kind(),
            from = %self.lifecycle.state(),
            to = %next.state(),
            "application transitioned"
        );
        self.lifecycle = next;
        Ok(())
    }

    pub fn record(&self) -> ApplicationRecord {
        ApplicationRecord {
            id: i64::from(self.id.get()),
            state: self.state().label().to_string(),
            first_name: self.first_name().to_string(),
            surname: self.surname().to_string(),
            unity_id: self.unity_id().to_string(),
            reviewer: self.reviewer().unwrap_or_default().to_string(),
            note: self.note().map(Note::label).unwrap_or_default().to_string(),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

use std::ops::RangeInclusive;

use super::allocator::IdAllocator;
use super::application::{Applicant, Application};
use super::command::Command;
use super::domain::ApplicationId;
use super::error::HiringError;

pub const HOURS_PER_WEEK: RangeInclusive<u32> = 5..=20;
pub const PAY_RATE: RangeInclusive<u32> = 7..=35;

/// An open position and the applications submitted for it, kept sorted by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    name: String,
    hours_per_week: u32,
    pay_rate: u32,
    applications: Vec<Application>,
}

impl Position {
    pub fn new(
        name: impl Into<String>,
        hours_per_week: u32,
        pay_rate: u32,
    ) -> Result<Self, PositionError> {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() || name.chars().any(char::is_control) {
            return Err(PositionError::InvalidPosition(
                "position name must be a non-blank single line".to_string(),
            ));
        }
        if !HOURS_PER_WEEK.contains(&hours_per_week) {
            return Err(PositionError::InvalidPosition(format!(
                "hours per week must be between {} and {}, got {hours_per_week}",
                HOURS_PER_WEEK.start(),
                HOURS_PER_WEEK.end()
            )));
        }
        if !PAY_RATE.contains(&pay_rate) {
            return Err(PositionError::InvalidPosition(format!(
                "pay rate must be between {} and {}, got {pay_rate}",
                PAY_RATE.start(),
                PAY_RATE.end()
            )));
        }

        Ok(Self {
            name,
            hours_per_week,
            pay_rate,
            applications: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hours_per_week(&self) -> u32 {
        self.hours_per_week
    }

    pub fn pay_rate(&self) -> u32 {
        self.pay_rate
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    /// Submit a new application and return its identifier.
    pub fn submit_application(
        &mut self,
        allocator: &mut IdAllocator,
        first_name: &str,
        surname: &str,
        unity_id: &str,
    ) -> Result<ApplicationId, PositionError> {
        let applicant = Applicant::new(first_name, surname, unity_id)?;
        let next = ApplicationId(allocator.peek());
        if self.position_of(next).is_ok() {
            return Err(HiringError::DuplicateIdentifier(next).into());
        }
        self.insert(Application::submit(allocator, applicant))
    }

    /// Insert an already built application, e.g. one restored from storage.
    pub fn add_application(
        &mut self,
        application: Application,
    ) -> Result<ApplicationId, PositionError> {
        self.insert(application)
    }

    fn insert(&mut self, application: Application) -> Result<ApplicationId, PositionError> {
        let id = application.id();
        match self.position_of(id) {
            Ok(_) => Err(HiringError::DuplicateIdentifier(id).into()),
            Err(index) => {
                self.applications.insert(index, application);
                Ok(id)
            }
        }
    }

    fn position_of(&self, id: ApplicationId) -> Result<usize, usize> {
        self.applications
            .binary_search_by_key(&id, |application| application.id())
    }

    pub fn application(&self, id: ApplicationId) -> Option<&Application> {
        self.position_of(id)
            .ok()
            .map(|index| &self.applications[index])
    }

    pub fn delete_application(&mut self, id: ApplicationId) -> Option<Application> {
        self.position_of(id)
            .ok()
            .map(|index| self.applications.remove(index))
    }

    /// Forward a command to the application with the given identifier.
    pub fn dispatch_command(
        &mut self,
        id: ApplicationId,
        command: &Command,
    ) -> Result<&Application, PositionError> {
        let index = self
            .position_of(id)
            .map_err(|_| PositionError::ApplicationNotFound(id))?;
        let application = &mut self.applications[index];
        application.apply(command)?;
        Ok(application)
    }

    pub fn max_id(&self) -> Option<ApplicationId> {
        self.applications.last().map(Application::id)
    }

    /// Reconcile the allocator with the highest identifier held here so newly submitted
    /// applications cannot collide with restored ones.
    pub fn sync_allocator(&self, allocator: &mut IdAllocator) -> Result<(), PositionError> {
        if let Some(max) = self.max_id() {
            allocator.reconcile(i64::from(max.get()))?;
        }
        Ok(())
    }
}

/// Error raised by position bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("position cannot be created: {0}")]
    InvalidPosition(String),
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error(transparent)]
    Hiring(#[from] HiringError),
}

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::allocator::IdAllocator;
use super::application::Application;
use super::command::Command;
use super::domain::{ApplicationId, ApplicationState};
use super::error::HiringError;
use super::position::{Position, PositionError};
use super::records::{PositionReader, PositionWriter, RecordError};

/// Summary row shown in application listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationRow {
    pub id: ApplicationId,
    pub state: ApplicationState,
    pub unity_id: String,
    pub reviewer: String,
}

impl From<&Application> for ApplicationRow {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id(),
            state: application.state(),
            unity_id: application.unity_id().to_string(),
            reviewer: application.reviewer().unwrap_or_default().to_string(),
        }
    }
}

/// Owns every known position, tracks which one is active, and shares one identifier allocator
/// across all of them.
#[derive(Debug, Default)]
pub struct HiringManager {
    positions: Vec<Position>,
    active: Option<usize>,
    allocator: IdAllocator,
}

impl HiringManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocator(&self) -> &IdAllocator {
        &self.allocator
    }

    /// Append every position in `path` and make the first one loaded active.
    pub fn load_positions_from_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<usize, ManagerError> {
        let loaded = PositionReader::from_path(path, &mut self.allocator)?;
        Ok(self.merge_positions(loaded))
    }

    /// Append positions whose names are not already known; returns how many were added.
    pub fn merge_positions(&mut self, loaded: Vec<Position>) -> usize {
        let mut first_added = None;
        let mut added = 0;

        for position in loaded {
            if self.position_index(position.name()).is_some() {
                warn!(position = position.name(), "skipping duplicate position");
                continue;
            }
            first_added.get_or_insert(self.positions.len());
            self.positions.push(position);
            added += 1;
        }

        if let Some(index) = first_added {
            self.active = Some(index);
            self.sync_active();
        }
        added
    }

    pub fn save_positions_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ManagerError> {
        if self.active.is_none() {
            return Err(ManagerError::NoActivePosition);
        }
        PositionWriter::to_path(path, &self.positions)?;
        Ok(())
    }

    /// Create a position with a unique name and make it active.
    pub fn add_new_position(
        &mut self,
        name: &str,
        hours_per_week: u32,
        pay_rate: u32,
    ) -> Result<(), ManagerError> {
        let position = Position::new(name, hours_per_week, pay_rate)?;
        let name = position.name().to_string();
        if self.position_index(&name).is_some() {
            return Err(ManagerError::DuplicatePosition(name));
        }
        self.positions.push(position);
        info!(position = %name, "added position");
        self.load_position(&name)
    }

    /// Activate the named position and bring the allocator in line with its applications.
    pub fn load_position(&mut self, name: &str) -> Result<(), ManagerError> {
        let index = self
            .position_index(name)
            .ok_or_else(|| ManagerError::PositionNotFound(name.to_string()))?;
        self.active = Some(index);
        self.sync_active();
        Ok(())
    }

    fn sync_active(&mut self) {
        if let Some(position) = self.active.and_then(|index| self.positions.get(index)) {
            // ids held by a position are always positive
            if let Err(err) = position.sync_allocator(&mut self.allocator) {
                warn!(position = position.name(), %err, "failed to sync application ids");
            }
        }
    }

    fn position_index(&self, name: &str) -> Option<usize> {
        self.positions
            .iter()
            .position(|position| position.name() == name)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn position_names(&self) -> Vec<&str> {
        self.positions.iter().map(Position::name).collect()
    }

    pub fn active_position(&self) -> Option<&Position> {
        self.active.and_then(|index| self.positions.get(index))
    }

    pub fn active_position_name(&self) -> Option<&str> {
        self.active_position().map(Position::name)
    }

    fn active_mut(&mut self) -> Result<(&mut Position, &mut IdAllocator), ManagerError> {
        let position = self
            .active
            .and_then(|index| self.positions.get_mut(index))
            .ok_or(ManagerError::NoActivePosition)?;
        Ok((position, &mut self.allocator))
    }

    pub fn add_application_to_position(
        &mut self,
        first_name: &str,
        surname: &str,
        unity_id: &str,
    ) -> Result<ApplicationId, ManagerError> {
        let (position, allocator) = self.active_mut()?;
        let id = position.submit_application(allocator, first_name, surname, unity_id)?;
        info!(position = position.name(), %id, "application submitted");
        Ok(id)
    }

    pub fn execute_command(
        &mut self,
        id: ApplicationId,
        command: &Command,
    ) -> Result<&Application, ManagerError> {
        let (position, _) = self.active_mut()?;
        Ok(position.dispatch_command(id, command)?)
    }

    /// Remove an application from the active position; unknown ids are ignored.
    pub fn delete_application_by_id(&mut self, id: ApplicationId) -> Option<Application> {
        let (position, _) = self.active_mut().ok()?;
        position.delete_application(id)
    }

    pub fn application_by_id(&self, id: ApplicationId) -> Option<&Application> {
        self.active_position()?.application(id)
    }

    /// Listing rows for the active position, optionally restricted to one state.
    pub fn application_rows(
        &self,
        filter: Option<ApplicationState>,
    ) -> Result<Vec<ApplicationRow>, ManagerError> {
        let position = self
            .active_position()
            .ok_or(ManagerError::NoActivePosition)?;
        Ok(position
            .applications()
            .iter()
            .filter(|application| filter.map_or(true, |state| application.state() == state))
            .map(ApplicationRow::from)
            .collect())
    }
}

/// Error raised while managing the position list.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("no position is active")]
    NoActivePosition,
    #[error("position '{0}' not available")]
    PositionNotFound(String),
    #[error("position '{0}' already exists")]
    DuplicatePosition(String),
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Records(#[from] RecordError),
}

impl From<HiringError> for ManagerError {
    fn from(err: HiringError) -> Self {
        Self::Position(PositionError::Hiring(err))
    }
}

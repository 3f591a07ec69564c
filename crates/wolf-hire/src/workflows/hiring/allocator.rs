use tracing::trace;

use super::domain::ApplicationId;
use super::error::HiringError;

/// Hands out application identifiers and keeps the counter ahead of every identifier it has
/// seen.
///
/// The allocator is an ordinary value: whoever constructs applications owns it (or borrows it
/// mutably), so concurrent hosts serialize access the same way they serialize access to the
/// applications themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    counter: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { counter: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier the next submitted application will receive.
    pub fn peek(&self) -> u32 {
        self.counter
    }

    /// Return the current counter value as an identifier and advance past it.
    pub fn next_id(&mut self) -> ApplicationId {
        let id = ApplicationId(self.counter);
        self.counter = self.counter.saturating_add(1);
        trace!(%id, next = self.counter, "allocated application id");
        id
    }

    /// Account for an identifier that was assigned elsewhere, e.g. restored from storage.
    ///
    /// Larger identifiers move the counter to `id + 1`, an identifier equal to the counter bumps
    /// it by one, and smaller identifiers leave it alone.
    pub fn reconcile(&mut self, existing: i64) -> Result<ApplicationId, HiringError> {
        let id = ApplicationId::new(existing)?;
        if id.get() > self.counter {
            self.set_counter(id.get());
        } else if id.get() == self.counter {
            self.counter = self.counter.saturating_add(1);
        }
        Ok(id)
    }

    /// Administrative override. `1` resets the counter to exactly one; any other value `n`
    /// leaves the counter at `n + 1`.
    pub fn set_counter(&mut self, value: u32) {
        self.counter = if value == 1 { 1 } else { value.saturating_add(1) };
    }
}

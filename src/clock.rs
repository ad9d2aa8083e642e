//! Source of "today" for callers that need the current date.
//!
//! Date arithmetic never reads the clock itself. Anything that depends on the
//! current date (overdue days, for instance) takes a [`Clock`] or an explicit
//! [`CalendarDate`] so it stays deterministic under test.

use crate::{CalendarDate, DateError};

/// Provides the current calendar date.
pub trait Clock: Send + Sync {
    /// Returns today's date.
    ///
    /// # Errors
    /// Returns a `DateError` if the underlying source reports a date outside
    /// the supported range.
    fn today(&self) -> Result<CalendarDate, DateError>;
}

/// Host clock, read in the local timezone and truncated to the date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Result<CalendarDate, DateError> {
        CalendarDate::try_from(chrono::Local::now().date_naive())
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> Result<CalendarDate, DateError> {
        Ok(self.0)
    }
}

/// Today's local date from the host clock.
///
/// # Errors
/// See [`Clock::today`].
pub fn today() -> Result<CalendarDate, DateError> {
    SystemClock.today()
}

use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DateError, SPAN_SEPARATOR, days_between, prelude::*};

/// An inclusive period of calendar days, `start..=end`.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateSpan {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date span operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    /// Start date is after end date.
    #[error("Invalid date span: start ({start}) is after end ({end})")]
    InvalidSpan { start: CalendarDate, end: CalendarDate },

    /// Error parsing or validating a date component.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid span format.
    #[error("Invalid span format: {0}")]
    InvalidFormat(String),
}

impl DateSpan {
    /// Creates a new span with validation.
    ///
    /// # Errors
    /// Returns `SpanError::InvalidSpan` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, SpanError> {
        if start > end {
            return Err(SpanError::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// A span covering a single day
    pub const fn single(date: CalendarDate) -> Self {
        Self {
            start: date,
            end:   date,
        }
    }

    /// Returns the first day of the span
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the last day of the span
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    /// Inclusive number of days in the span, always at least 1
    pub const fn days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    /// Checks if the span contains a given date
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this span shares at least one day with another span
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this span is completely contained within another span
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Days common to both spans, or `None` when they do not overlap
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Splits the span at calendar-year boundaries.
    ///
    /// Each slice lies within one year; the first starts at `start`, the last
    /// ends at `end`, and their day counts add up to [`DateSpan::days`].
    pub fn split_by_year(&self) -> Vec<Self> {
        let slices = self.split_at(CalendarDate::last_of_year);
        tracing::trace!(span = %self, slices = slices.len(), "split by calendar year");
        slices
    }

    /// Splits the span at semester boundaries (June 30 / July 1 and year end).
    pub fn split_by_semester(&self) -> Vec<Self> {
        let slices = self.split_at(CalendarDate::last_of_semester);
        tracing::trace!(span = %self, slices = slices.len(), "split by semester");
        slices
    }

    // `period_end` maps a date to the last day of the period containing it.
    fn split_at(&self, period_end: impl Fn(CalendarDate) -> CalendarDate) -> Vec<Self> {
        let mut slices = Vec::new();
        let mut cursor = self.start;
        loop {
            let end = period_end(cursor).min(self.end);
            slices.push(Self { start: cursor, end });
            match end.succ() {
                Some(next) if end < self.end => cursor = next,
                _ => break,
            }
        }
        slices
    }
}

impl TryFrom<(CalendarDate, CalendarDate)> for DateSpan {
    type Error = SpanError;

    fn try_from((start, end): (CalendarDate, CalendarDate)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl FromStr for DateSpan {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(SPAN_SEPARATOR).count();

        match separator_count {
            0 => Err(SpanError::InvalidFormat(format!(
                "No span separator found (expected '{SPAN_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(SPAN_SEPARATOR).ok_or_else(|| {
                    SpanError::InvalidFormat(format!(
                        "Separator '{SPAN_SEPARATOR}' not found despite count == 1"
                    ))
                })?;

                let start = start_str.trim().parse::<CalendarDate>()?;
                let end = end_str.trim().parse::<CalendarDate>()?;

                Self::new(start, end)
            },
            _ => Err(SpanError::InvalidFormat(format!(
                "Too many '{SPAN_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for DateSpan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateSpan {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for DateSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

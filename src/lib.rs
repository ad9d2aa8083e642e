mod clock;
mod consts;
mod ordinal;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use clock::{Clock, FixedClock, SystemClock, today};
pub use consts::*;
pub use range::{DateSpan, SpanError};
pub use types::{Day, Month, Year, days_in_month, days_in_year, is_leap_year};

use crate::prelude::*;
use std::str::FromStr;

/// A proleptic-Gregorian calendar day with no time of day and no timezone.
///
/// Every value denotes a real day: the components are validated on
/// construction and invalid triples are rejected rather than rolled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(
        fmt = "Day index {} is outside {:04}-01-01..={}-12-31",
        index,
        MIN_YEAR,
        MAX_YEAR
    )]
    RangeOverflow { index: i64 },
    #[display(fmt = "Offset of {offset} days from {start} overflows the day index")]
    OffsetOverflow { start: CalendarDate, offset: i64 },
}

impl std::error::Error for DateError {}

impl DateError {
    /// Whether the error is about components that do not form a real calendar day
    pub const fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            Self::InvalidYear(_) | Self::InvalidMonth(_) | Self::InvalidDay { .. }
        )
    }

    /// Whether the error comes from arithmetic leaving the representable range
    pub const fn is_range_overflow(&self) -> bool {
        matches!(self, Self::RangeOverflow { .. } | Self::OffsetOverflow { .. })
    }
}

impl CalendarDate {
    /// Earliest representable date, 0001-01-01
    pub const MIN: Self = Self {
        year:  Year::MIN,
        month: Month::JANUARY,
        day:   Day::FIRST,
    };
    /// Latest representable date, 9999-12-31
    pub const MAX: Self = Self {
        year:  Year::MAX,
        month: Month::DECEMBER,
        day:   Day::THIRTY_FIRST,
    };

    /// Creates a date from a 1-based `(year, month, day)` triple.
    ///
    /// # Errors
    /// Returns an invalid-date error (`InvalidYear`, `InvalidMonth` or
    /// `InvalidDay`) when the triple is not a real calendar day.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from already validated year and month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if `day` does not exist in that month.
    pub fn from_typed(year: Year, month: Month, day: u8) -> Result<Self, DateError> {
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// 1-based month (January = 1)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Returns the `(year, month, day)` triple with a 1-based month
    pub const fn to_parts(&self) -> (u16, u8, u8) {
        (self.year(), self.month(), self.day())
    }

    /// Days since 1970-01-01 (negative before the epoch)
    pub const fn day_index(&self) -> i64 {
        ordinal::to_day_index(self.year(), self.month(), self.day())
    }

    /// Converts a day-index back into a calendar date.
    ///
    /// # Errors
    /// Returns `DateError::RangeOverflow` if the index falls outside
    /// `CalendarDate::MIN..=CalendarDate::MAX`.
    pub fn from_day_index(index: i64) -> Result<Self, DateError> {
        if !(Self::MIN.day_index()..=Self::MAX.day_index()).contains(&index) {
            tracing::debug!(index, "day index outside the representable calendar");
            return Err(DateError::RangeOverflow { index });
        }
        let (year, month, day) = ordinal::from_day_index(index);
        let year = u16::try_from(year).map_err(|_| DateError::RangeOverflow { index })?;
        Self::new(year, month, day)
    }

    /// Inclusive number of days from `self` through `end`; see [`days_between`].
    pub const fn days_through(self, end: Self) -> i64 {
        end.day_index() - self.day_index() + 1
    }

    /// The date `offset` days after `self` (before, for negative offsets).
    ///
    /// # Errors
    /// Returns `DateError::OffsetOverflow` if the index arithmetic overflows and
    /// `DateError::RangeOverflow` if the result is not a representable date.
    pub fn checked_add_days(self, offset: i64) -> Result<Self, DateError> {
        let index = self.day_index().checked_add(offset).ok_or_else(|| {
            tracing::debug!(start = %self, offset, "day offset overflows i64");
            DateError::OffsetOverflow {
                start: self,
                offset,
            }
        })?;
        Self::from_day_index(index)
    }

    /// The following day, or `None` after `CalendarDate::MAX`
    pub fn succ(self) -> Option<Self> {
        if self.day() < days_in_month(self.year(), self.month()) {
            return Self::from_typed(self.year, self.month, self.day() + 1).ok();
        }
        if self.month() < DECEMBER {
            return Self::new(self.year(), self.month() + 1, MIN_DAY).ok();
        }
        self.year()
            .checked_add(1)
            .and_then(|year| Year::new(year).ok())
            .map(|year| Self {
                year,
                month: Month::JANUARY,
                day: Day::FIRST,
            })
    }

    /// The preceding day, or `None` before `CalendarDate::MIN`
    pub fn pred(self) -> Option<Self> {
        if self.day() > MIN_DAY {
            return Self::from_typed(self.year, self.month, self.day() - 1).ok();
        }
        if self.month() > JANUARY {
            let month = self.month() - 1;
            return Self::new(self.year(), month, days_in_month(self.year(), month)).ok();
        }
        self.year()
            .checked_sub(1)
            .and_then(|year| Year::new(year).ok())
            .map(|year| Self {
                year,
                month: Month::DECEMBER,
                day: Day::THIRTY_FIRST,
            })
    }

    /// January 1st of this date's year
    pub const fn first_of_year(self) -> Self {
        Self {
            year:  self.year,
            month: Month::JANUARY,
            day:   Day::FIRST,
        }
    }

    /// December 31st of this date's year
    pub const fn last_of_year(self) -> Self {
        Self {
            year:  self.year,
            month: Month::DECEMBER,
            day:   Day::THIRTY_FIRST,
        }
    }

    /// Last day of the semester (June 30 or December 31) containing this date
    pub const fn last_of_semester(self) -> Self {
        if self.month() <= JUNE {
            Self {
                year:  self.year,
                month: Month::JUNE,
                day:   Day::THIRTIETH,
            }
        } else {
            self.last_of_year()
        }
    }
}

/// Inclusive number of calendar days spanned by `start..=end`.
///
/// A date counted against itself gives 1. No absolute value is taken: when
/// `end` precedes `start` the same `end - start + 1` arithmetic applies, so the
/// day before `start` gives 0 and two days before gives -1.
pub const fn days_between(start: CalendarDate, end: CalendarDate) -> i64 {
    start.days_through(end)
}

/// The calendar date `offset_days` after `start` (before it when negative).
///
/// # Errors
/// Returns a range-overflow error when the result would fall outside
/// `0001-01-01..=9999-12-31`.
pub fn add_days_to_date(start: CalendarDate, offset_days: i64) -> Result<CalendarDate, DateError> {
    start.checked_add_days(offset_days)
}

/// Exclusive difference in days, `to - from`. Zero for the same day.
pub const fn days_elapsed(from: CalendarDate, to: CalendarDate) -> i64 {
    to.day_index() - from.day_index()
}

/// Days that `as_of` lies past `deadline`, or zero if the deadline has not passed.
pub fn overdue_days(deadline: CalendarDate, as_of: CalendarDate) -> i64 {
    days_elapsed(deadline, as_of).max(0)
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = DateError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<CalendarDate> for (u16, u8, u8) {
    fn from(date: CalendarDate) -> Self {
        date.to_parts()
    }
}

impl TryFrom<chrono::NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;

        let year = u16::try_from(date.year())
            .map_err(|_| DateError::InvalidFormat(format!("year out of range: {date}")))?;
        // chrono months and days are 1-based and always fit in u8
        let month =
            u8::try_from(date.month()).map_err(|_| DateError::InvalidFormat(date.to_string()))?;
        let day =
            u8::try_from(date.day()).map_err(|_| DateError::InvalidFormat(date.to_string()))?;
        Self::new(year, month, day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} component(s) in {trimmed}",
                parts.len()
            )));
        };

        let year = Self::parse_component::<u16>(year)?;
        let month = Self::parse_component::<u8>(month)?;
        let day = Self::parse_component::<u8>(day)?;
        Self::new(year, month, day)
    }
}

impl CalendarDate {
    /// Parses one numeric component, rejecting signs and non-digits
    fn parse_component<T: FromStr>(s: &str) -> Result<T, DateError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

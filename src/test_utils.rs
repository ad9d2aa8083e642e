//! Builders for tests. Panic on invalid input.

use crate::{CalendarDate, DateSpan, Month, Year};

pub(crate) fn year(value: u16) -> Year {
    Year::new(value).unwrap()
}

pub(crate) fn month(value: u8) -> Month {
    Month::new(value).unwrap()
}

pub(crate) fn date(y: u16, m: u8, d: u8) -> CalendarDate {
    CalendarDate::new(y, m, d).unwrap()
}

pub(crate) fn span(start: (u16, u8, u8), end: (u16, u8, u8)) -> DateSpan {
    DateSpan::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2)).unwrap()
}

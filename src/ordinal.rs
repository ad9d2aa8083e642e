//! Linear day-index conversion for the proleptic Gregorian calendar.
//!
//! The index counts days from 1970-01-01 (index 0). Years are shifted to start
//! in March so the leap day is the last day of the shifted year, which lets the
//! month offsets be computed with a fixed `153`-day five-month pattern.

use crate::consts::{DAYS_PER_GREGORIAN_CYCLE, EPOCH_SHIFT};

const YEARS_PER_CYCLE: i64 = 400;
const DAYS_PER_YEAR: i64 = 365;

/// Day-index of a `(year, month, day)` triple. The triple must already be valid.
pub(crate) const fn to_day_index(year: u16, month: u8, day: u8) -> i64 {
    let month = month as i64;
    let day = day as i64;
    let year = year as i64 - if month <= 2 { 1 } else { 0 };

    let cycle = year.div_euclid(YEARS_PER_CYCLE);
    let year_of_cycle = year - cycle * YEARS_PER_CYCLE;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_cycle = year_of_cycle * DAYS_PER_YEAR + year_of_cycle / 4 - year_of_cycle / 100
        + day_of_year;

    cycle * DAYS_PER_GREGORIAN_CYCLE + day_of_cycle - EPOCH_SHIFT
}

/// Inverse of [`to_day_index`]: `(year, month, day)` with an unbounded year.
///
/// Callers must check `index` against the representable range first, the year
/// is returned as `i64` so out-of-range inputs never truncate silently.
pub(crate) const fn from_day_index(index: i64) -> (i64, u8, u8) {
    let shifted = index + EPOCH_SHIFT;
    let cycle = shifted.div_euclid(DAYS_PER_GREGORIAN_CYCLE);
    let day_of_cycle = shifted - cycle * DAYS_PER_GREGORIAN_CYCLE;
    let year_of_cycle = (day_of_cycle - day_of_cycle / 1460 + day_of_cycle / 36524
        - day_of_cycle / 146_096)
        / DAYS_PER_YEAR;
    let day_of_year =
        day_of_cycle - (DAYS_PER_YEAR * year_of_cycle + year_of_cycle / 4 - year_of_cycle / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_cycle + cycle * YEARS_PER_CYCLE + if month <= 2 { 1 } else { 0 };

    // day is in 1..=31 and month in 1..=12 by construction
    (year, month as u8, day as u8)
}

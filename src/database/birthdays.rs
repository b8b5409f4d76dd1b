//! Year-independent birthday window matching.
//!
//! A birthday is matched on (month, day) alone, so a window is reduced to the
//! set of (month, day) pairs it covers. Walking the window day-by-day makes
//! year-boundary wraparound (Dec 28 - Jan 4) fall out for free: the walk just
//! crosses into January and keeps collecting.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Number of distinct (month, day) pairs a calendar can produce
const MAX_MONTH_DAYS: usize = 366;

/// Encode a date's month and day as a single `MMDD`-style integer,
/// e.g. Jan 2 -> 102, Dec 28 -> 1228. Birth year never participates.
pub fn month_day_code(date: NaiveDate) -> i32 {
    (date.month() as i32) * 100 + date.day() as i32
}

/// Collect the month/day codes covered by `[start, end]` inclusive.
///
/// Feb 29 is present only when the walked range contains an actual leap day,
/// so leap-day birthdays match in leap years and stay silent otherwise.
/// Returns an empty set when the window is inverted.
pub fn window_month_day_codes(start: NaiveDate, end: NaiveDate) -> Vec<i32> {
    let mut codes = BTreeSet::new();

    if end >= start {
        for day in start.iter_days() {
            // Past 366 entries the set cannot grow; stop walking huge windows
            if day > end || codes.len() == MAX_MONTH_DAYS {
                break;
            }
            codes.insert(month_day_code(day));
        }
    }

    codes.into_iter().collect()
}

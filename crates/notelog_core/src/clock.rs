//! Time source for note creation timestamps.
//!
//! # Responsibility
//! - Abstract "now" so sessions stay deterministic under test.
//! - Render creation times in the list-view display format.
//!
//! # Invariants
//! - Rendered timestamps use the month abbreviation, ordinal day, year and a
//!   12-hour clock with lowercase meridiem, e.g. `Oct 17th 2026, 3:04:05 pm`.

use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.at
    }
}

/// Formats a creation time for display, e.g. `Oct 17th 2026, 3:04:05 pm`.
pub fn format_time_created(at: &DateTime<FixedOffset>) -> String {
    let day = at.day();
    let (is_pm, hour) = at.hour12();
    format!(
        "{} {}{} {}, {}:{:02}:{:02} {}",
        at.format("%b"),
        day,
        ordinal_suffix(day),
        at.year(),
        hour,
        at.minute(),
        at.second(),
        if is_pm { "pm" } else { "am" }
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

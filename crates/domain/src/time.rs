//! Wall-clock helpers used to evaluate plannings.

use chrono::{DateTime, Datelike, Local, Timelike};

use crate::planning::DayOfWeek;

/// A point in the weekly schedule, at minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekTime {
    pub dow: DayOfWeek,
    pub hour: u8,
    pub minute: u8,
}

impl WeekTime {
    /// Project a local timestamp onto the week.
    #[must_use]
    // chrono keeps weekday, hour and minute well inside u8
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_datetime(at: &DateTime<Local>) -> Self {
        Self {
            dow: DayOfWeek::from_sunday_index(at.weekday().num_days_from_sunday() as u8),
            hour: at.hour() as u8,
            minute: at.minute() as u8,
        }
    }
}

/// Current local time projected onto the week.
#[must_use]
pub fn now() -> WeekTime {
    WeekTime::from_datetime(&Local::now())
}

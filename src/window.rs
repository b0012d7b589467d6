//! Trailing date window the climate data is requested for.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Calendar date format used for the window and the API interval.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days back from the run date to the first day of the window.
const WINDOW_START_DAYS: i64 = 30;

/// Thirty days ending yesterday, both ends inclusive as the API sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl DateWindow {
    /// Derives the window from the run's wall-clock time.
    pub fn ending_before(now: NaiveDateTime) -> Self {
        Self {
            from_date: (now - TimeDelta::days(WINDOW_START_DAYS)).date(),
            to_date: (now - TimeDelta::days(1)).date(),
        }
    }

    /// Formats both ends with `format`, e.g. [`DATE_FORMAT`].
    pub fn format(&self, format: &str) -> (String, String) {
        (
            self.from_date.format(format).to_string(),
            self.to_date.format(format).to_string(),
        )
    }

    /// Renders the `datetime` query value: `{from}T00:00:00.000Z/{to}T00:00:00.000Z`.
    pub fn interval(&self) -> String {
        let (from, to) = self.format(DATE_FORMAT);
        format!("{from}T00:00:00.000Z/{to}T00:00:00.000Z")
    }
}

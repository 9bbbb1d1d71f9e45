use chrono::{NaiveDate, Utc};
use log::debug;

use super::period_model::Period;

/// Normalizes raw (month, year) input into billing periods.
///
/// Malformed input is never surfaced to callers: when either component is
/// absent or invalid the current calendar month of the server clock is used.
pub struct PeriodCalendar;

impl PeriodCalendar {
    /// The period containing today's date (UTC).
    pub fn current() -> Period {
        Period::containing(Self::today())
    }

    /// Normalizes typed input against the server clock.
    pub fn normalize(month: Option<u32>, year: Option<i32>) -> Period {
        Self::normalize_at(month, year, Self::today())
    }

    /// Normalizes typed input against an explicit "today".
    pub fn normalize_at(month: Option<u32>, year: Option<i32>, today: NaiveDate) -> Period {
        match (month, year) {
            (Some(month), Some(year)) => Period::new(month, year).unwrap_or_else(|e| {
                debug!("Falling back to current period: {}", e);
                Period::containing(today)
            }),
            _ => Period::containing(today),
        }
    }

    /// Normalizes query-string input against the server clock.
    pub fn normalize_raw(month: Option<&str>, year: Option<&str>) -> Period {
        Self::normalize_raw_at(month, year, Self::today())
    }

    /// Normalizes query-string input against an explicit "today".
    ///
    /// Surrounding whitespace is ignored; anything that does not parse as an
    /// integer counts as invalid.
    pub fn normalize_raw_at(month: Option<&str>, year: Option<&str>, today: NaiveDate) -> Period {
        let month = month.and_then(|m| m.trim().parse::<u32>().ok());
        let year = year.and_then(|y| y.trim().parse::<i32>().ok());
        Self::normalize_at(month, year, today)
    }

    pub fn previous(period: Period) -> Period {
        period.previous()
    }

    pub fn next(period: Period) -> Period {
        period.next()
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Earliest year accepted from user input.
pub const MIN_YEAR: i32 = 1;
/// Latest year accepted from user input.
pub const MAX_YEAR: i32 = 9999;

/// A billing period: one calendar month of one year.
///
/// Periods order by `(year, month)`. The month is always in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    // Field order drives the derived ordering.
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    month: u32,
    year: i32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = ValidationError;

    fn try_from(raw: RawPeriod) -> std::result::Result<Self, Self::Error> {
        Period::validated(raw.month, raw.year)
    }
}

impl Period {
    /// Builds a period from user-supplied values.
    ///
    /// Rejects months outside `1..=12` and years outside `1..=9999`.
    pub fn new(month: u32, year: i32) -> Result<Self> {
        Ok(Self::validated(month, year)?)
    }

    fn validated(month: u32, year: i32) -> std::result::Result<Self, ValidationError> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::InvalidPeriod { month, year });
        }
        Ok(Self { year, month })
    }

    /// The period a calendar date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Rolls the period back one month, wrapping January to December of the prior year.
    ///
    /// Saturates at January of [`MIN_YEAR`] so the result stays a valid period.
    pub fn previous(&self) -> Self {
        if self.month == 1 && self.year <= MIN_YEAR {
            *self
        } else if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Advances the period one month, wrapping December to January of the next year.
    ///
    /// Saturates at December of [`MAX_YEAR`].
    pub fn next(&self) -> Self {
        if self.month == 12 && self.year >= MAX_YEAR {
            *self
        } else if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// All twelve periods of a year, January first.
    pub fn months_of(year: i32) -> Vec<Self> {
        (1..=12).map(|month| Self { year, month }).collect()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_months() {
        assert!(Period::new(0, 2024).is_err());
        assert!(Period::new(13, 2024).is_err());
        assert!(Period::new(12, 2024).is_ok());
    }

    #[test]
    fn rejects_out_of_range_years() {
        assert!(Period::new(1, 0).is_err());
        assert!(Period::new(1, 10_000).is_err());
    }

    #[test]
    fn orders_by_year_then_month() {
        let dec_2023 = Period::new(12, 2023).unwrap();
        let jan_2024 = Period::new(1, 2024).unwrap();
        let feb_2024 = Period::new(2, 2024).unwrap();
        assert!(dec_2023 < jan_2024);
        assert!(jan_2024 < feb_2024);
    }

    #[test]
    fn previous_wraps_january() {
        let jan = Period::new(1, 2024).unwrap();
        assert_eq!(jan.previous(), Period::new(12, 2023).unwrap());
        let mar = Period::new(3, 2024).unwrap();
        assert_eq!(mar.previous(), Period::new(2, 2024).unwrap());
    }

    #[test]
    fn next_wraps_december() {
        let dec = Period::new(12, 2023).unwrap();
        assert_eq!(dec.next(), Period::new(1, 2024).unwrap());
        assert_eq!(dec.next().previous(), dec);
    }

    #[test]
    fn adjacent_periods_stay_within_year_range() {
        let first = Period::new(1, MIN_YEAR).unwrap();
        assert_eq!(first.previous(), first);
        assert_eq!(first.previous().year(), MIN_YEAR);
        assert_eq!(Period::new(2, MIN_YEAR).unwrap().previous(), first);

        let last = Period::new(12, MAX_YEAR).unwrap();
        assert_eq!(last.next(), last);
        assert_eq!(Period::new(11, MAX_YEAR).unwrap().next(), last);
    }

    #[test]
    fn deserialize_validates_month() {
        let ok: Period = serde_json::from_str(r#"{"month":5,"year":2024}"#).unwrap();
        assert_eq!(ok.month(), 5);
        assert!(serde_json::from_str::<Period>(r#"{"month":14,"year":2024}"#).is_err());
    }

    #[test]
    fn containing_uses_calendar_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Period::containing(date), Period::new(2, 2024).unwrap());
    }

    #[test]
    fn displays_as_year_month() {
        assert_eq!(Period::new(7, 2024).unwrap().to_string(), "2024-07");
    }
}

//! Column conversion helpers shared by the repositories.

use std::str::FromStr;

use rentledger_core::Period;
use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Parses a decimal stored as TEXT.
///
/// Unlike user input, a stored amount that does not parse is a corrupt row,
/// so there is no fallback to zero.
pub fn parse_decimal(column: &'static str, value: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value.trim()).map_err(|_| StorageError::InvalidColumn {
        column,
        value: value.to_string(),
    })
}

/// Splits a period into its `(year, month)` columns.
pub fn period_columns(period: Period) -> (i32, i32) {
    (period.year(), period.month() as i32)
}

/// Rebuilds a period from its `(year, month)` columns.
pub fn period_from_columns(year: i32, month: i32) -> Result<Period, StorageError> {
    u32::try_from(month)
        .ok()
        .and_then(|m| Period::new(m, year).ok())
        .ok_or_else(|| StorageError::InvalidColumn {
            column: "month",
            value: format!("{}-{}", year, month),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_stored_decimals_exactly() {
        assert_eq!(parse_decimal("payment", "1033.33").unwrap(), dec!(1033.33));
        assert_eq!(parse_decimal("payment", " -600 ").unwrap(), dec!(-600));
    }

    #[test]
    fn rejects_garbage_amounts() {
        let err = parse_decimal("payment", "12,50").unwrap_err();
        assert!(matches!(err, StorageError::InvalidColumn { column: "payment", .. }));
    }

    #[test]
    fn period_columns_round_trip() {
        let period = Period::new(12, 2023).unwrap();
        let (year, month) = period_columns(period);
        assert_eq!((year, month), (2023, 12));
        assert_eq!(period_from_columns(year, month).unwrap(), period);
    }

    #[test]
    fn out_of_range_month_is_corrupt() {
        assert!(period_from_columns(2024, 13).is_err());
        assert!(period_from_columns(2024, -1).is_err());
    }
}

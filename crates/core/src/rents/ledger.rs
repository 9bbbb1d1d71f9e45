//! Per-tenant ledger derivation and balance carry-forward checks.

use log::warn;
use rust_decimal::Decimal;

use super::rents_model::{IntegrityWarning, LedgerEntry, RentRecord, RentStatus, TenantRentHistory};
use crate::errors::Result;
use crate::periods::Period;
use crate::tenants::Tenant;

/// Derives ledger entries from stored rent records.
///
/// The ledger only reads records; it never writes balances back.
pub struct RentLedger;

impl RentLedger {
    /// Builds the entry for a stored record.
    pub fn entry(record: &RentRecord, queried: Period) -> Result<LedgerEntry> {
        let new_balance = record.new_balance()?;
        Ok(LedgerEntry {
            uid: LedgerEntry::uid_for(&record.tenant_id, record.period),
            tenant_id: record.tenant_id.clone(),
            period: record.period,
            total_to_pay: record.total_to_pay,
            payment: record.payment,
            balance_brought_forward: record.balance_brought_forward,
            new_balance,
            status: RentStatus::classify(record.total_to_pay, record.payment, new_balance),
            is_current_period: record.period == queried,
            has_record: true,
            payment_date: record.payment_date,
            payment_type: record.payment_type.clone(),
            payment_reference: record.payment_reference.clone(),
            description: record.description.clone(),
        })
    }

    /// An all-zero `NotPaid` row for a period that was never billed.
    pub fn placeholder(tenant_id: &str, period: Period, queried: Period) -> LedgerEntry {
        LedgerEntry {
            uid: LedgerEntry::uid_for(tenant_id, period),
            tenant_id: tenant_id.to_string(),
            period,
            total_to_pay: Decimal::ZERO,
            payment: Decimal::ZERO,
            balance_brought_forward: Decimal::ZERO,
            new_balance: Decimal::ZERO,
            status: RentStatus::NotPaid,
            is_current_period: period == queried,
            has_record: false,
            payment_date: None,
            payment_type: None,
            payment_reference: None,
            description: None,
        }
    }

    /// Derives the entry of `tenant` for `period`.
    ///
    /// Without a record, active tenants get a placeholder and inactive tenants
    /// get nothing.
    pub fn derive(
        tenant: &Tenant,
        record: Option<&RentRecord>,
        period: Period,
        queried: Period,
    ) -> Result<Option<LedgerEntry>> {
        match record {
            Some(record) => Self::entry(record, queried).map(Some),
            None if tenant.is_active_in(period) => {
                Ok(Some(Self::placeholder(&tenant.id, period, queried)))
            }
            None => Ok(None),
        }
    }

    /// Checks that `current` carries forward the new balance of `prior`.
    ///
    /// Only consecutive periods of the same tenant are compared.
    pub fn check_carry_forward(
        prior: &RentRecord,
        current: &RentRecord,
    ) -> Result<Option<IntegrityWarning>> {
        if prior.tenant_id != current.tenant_id || prior.period.next() != current.period {
            return Ok(None);
        }
        let expected = prior.new_balance()?;
        if current.balance_brought_forward == expected {
            return Ok(None);
        }
        let warning = IntegrityWarning {
            tenant_id: current.tenant_id.clone(),
            period: current.period,
            expected_balance: expected,
            actual_balance: current.balance_brought_forward,
        };
        warn!("Broken balance chain: {}", warning);
        Ok(Some(warning))
    }

    /// Checks every consecutive pair of an ascending record history.
    pub fn chain_warnings(records: &[RentRecord]) -> Result<Vec<IntegrityWarning>> {
        let mut warnings = Vec::new();
        for pair in records.windows(2) {
            if let [prior, current] = pair {
                warnings.extend(Self::check_carry_forward(prior, current)?);
            }
        }
        Ok(warnings)
    }

    /// Builds a tenant's history, ascending by period.
    ///
    /// When the queried period has no record and the tenant was active then,
    /// a placeholder row takes its place.
    pub fn history(
        tenant: Tenant,
        mut records: Vec<RentRecord>,
        queried: Period,
    ) -> Result<TenantRentHistory> {
        records.sort_by_key(|r| r.period);
        records.dedup_by_key(|r| r.period);

        let warnings = Self::chain_warnings(&records)?;
        let mut entries = records
            .iter()
            .map(|r| Self::entry(r, queried))
            .collect::<Result<Vec<LedgerEntry>>>()?;

        if !records.iter().any(|r| r.period == queried) {
            if let Some(placeholder) = Self::derive(&tenant, None, queried, queried)? {
                let at = entries.partition_point(|e| e.period < queried);
                entries.insert(at, placeholder);
            }
        }

        Ok(TenantRentHistory {
            tenant,
            entries,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CalculationError, Error};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn period(month: u32, year: i32) -> Period {
        Period::new(month, year).unwrap()
    }

    fn tenant() -> Tenant {
        Tenant {
            id: "t1".to_string(),
            realm_id: "r1".to_string(),
            name: "Jane Doe".to_string(),
            begin_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: None,
            termination_date: None,
        }
    }

    fn record(p: Period, total: Decimal, payment: Decimal, brought: Decimal) -> RentRecord {
        RentRecord {
            id: format!("rent-{}", p),
            realm_id: "r1".to_string(),
            tenant_id: "t1".to_string(),
            period: p,
            total_to_pay: total,
            payment,
            balance_brought_forward: brought,
            payment_date: None,
            payment_type: None,
            payment_reference: None,
            description: None,
        }
    }

    #[test]
    fn full_payment_is_paid() {
        let e = RentLedger::entry(&record(period(1, 2024), dec!(1000), dec!(1000), dec!(0)), period(1, 2024)).unwrap();
        assert_eq!(e.new_balance, dec!(0));
        assert_eq!(e.status, RentStatus::Paid);
        assert!(e.is_current_period);
        assert_eq!(e.uid, "t1|1|2024");
    }

    #[test]
    fn partial_payment_is_partially_paid() {
        let e = RentLedger::entry(&record(period(1, 2024), dec!(1000), dec!(400), dec!(0)), period(2, 2024)).unwrap();
        assert_eq!(e.new_balance, dec!(-600));
        assert_eq!(e.status, RentStatus::PartiallyPaid);
        assert!(!e.is_current_period);
    }

    #[test]
    fn no_payment_with_debt_is_not_paid() {
        let e = RentLedger::entry(&record(period(1, 2024), dec!(1000), dec!(0), dec!(-200)), period(1, 2024)).unwrap();
        assert_eq!(e.new_balance, dec!(-1200));
        assert_eq!(e.status, RentStatus::NotPaid);
    }

    #[test]
    fn zero_billing_is_paid_even_with_debt() {
        let e = RentLedger::entry(&record(period(1, 2024), dec!(0), dec!(0), dec!(-300)), period(1, 2024)).unwrap();
        assert_eq!(e.new_balance, dec!(-300));
        assert_eq!(e.status, RentStatus::Paid);
    }

    #[test]
    fn credit_covering_the_bill_is_paid() {
        let e = RentLedger::entry(&record(period(1, 2024), dec!(500), dec!(0), dec!(600)), period(1, 2024)).unwrap();
        assert_eq!(e.new_balance, dec!(100));
        assert_eq!(e.status, RentStatus::Paid);
    }

    #[test]
    fn decimal_balances_do_not_drift() {
        let e = RentLedger::entry(
            &record(period(1, 2024), dec!(1033.33), dec!(1000.10), dec!(33.23)),
            period(1, 2024),
        )
        .unwrap();
        assert_eq!(e.new_balance, dec!(0.00));
        assert_eq!(e.status, RentStatus::Paid);
    }

    #[test]
    fn derive_without_record_depends_on_activity() {
        let active = tenant();
        let entry = RentLedger::derive(&active, None, period(3, 2024), period(3, 2024))
            .unwrap()
            .unwrap();
        assert_eq!(entry.status, RentStatus::NotPaid);
        assert!(!entry.has_record);
        assert_eq!(entry.total_to_pay, dec!(0));

        let mut terminated = tenant();
        terminated.termination_date = NaiveDate::from_ymd_opt(2024, 2, 15);
        assert!(RentLedger::derive(&terminated, None, period(3, 2024), period(3, 2024))
            .unwrap()
            .is_none());
    }

    #[test]
    fn carry_forward_match_produces_no_warning() {
        let jan = record(period(1, 2024), dec!(1000), dec!(400), dec!(0));
        let feb = record(period(2, 2024), dec!(1000), dec!(1600), dec!(-600));
        assert!(RentLedger::check_carry_forward(&jan, &feb).unwrap().is_none());
    }

    #[test]
    fn carry_forward_mismatch_is_reported() {
        let jan = record(period(1, 2024), dec!(1000), dec!(400), dec!(0));
        let feb = record(period(2, 2024), dec!(1000), dec!(1000), dec!(0));
        let warning = RentLedger::check_carry_forward(&jan, &feb).unwrap().unwrap();
        assert_eq!(warning.period, period(2, 2024));
        assert_eq!(warning.expected_balance, dec!(-600));
        assert_eq!(warning.actual_balance, dec!(0));
    }

    #[test]
    fn non_consecutive_periods_are_not_compared() {
        let jan = record(period(1, 2024), dec!(1000), dec!(0), dec!(0));
        let mar = record(period(3, 2024), dec!(1000), dec!(1000), dec!(0));
        assert!(RentLedger::check_carry_forward(&jan, &mar).unwrap().is_none());
    }

    #[test]
    fn history_sorts_and_flags_queried_period() {
        let records = vec![
            record(period(3, 2024), dec!(1000), dec!(1000), dec!(0)),
            record(period(1, 2024), dec!(1000), dec!(1000), dec!(0)),
            record(period(2, 2024), dec!(1000), dec!(1000), dec!(0)),
        ];
        let history = RentLedger::history(tenant(), records, period(2, 2024)).unwrap();
        let periods: Vec<Period> = history.entries.iter().map(|e| e.period).collect();
        assert_eq!(periods, vec![period(1, 2024), period(2, 2024), period(3, 2024)]);
        let current: Vec<bool> = history.entries.iter().map(|e| e.is_current_period).collect();
        assert_eq!(current, vec![false, true, false]);
        assert!(history.warnings.is_empty());
    }

    #[test]
    fn history_inserts_placeholder_for_missing_queried_period() {
        let records = vec![
            record(period(1, 2024), dec!(1000), dec!(1000), dec!(0)),
            record(period(3, 2024), dec!(1000), dec!(1000), dec!(0)),
        ];
        let history = RentLedger::history(tenant(), records, period(2, 2024)).unwrap();
        assert_eq!(history.entries.len(), 3);
        let middle = &history.entries[1];
        assert_eq!(middle.period, period(2, 2024));
        assert!(!middle.has_record);
        assert!(middle.is_current_period);
    }

    #[test]
    fn history_reports_broken_chain_without_failing() {
        let records = vec![
            record(period(1, 2024), dec!(1000), dec!(0), dec!(0)),
            record(period(2, 2024), dec!(1000), dec!(1000), dec!(0)),
        ];
        let history = RentLedger::history(tenant(), records, period(2, 2024)).unwrap();
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.warnings.len(), 1);
        assert_eq!(history.warnings[0].expected_balance, dec!(-1000));
    }

    #[test]
    fn overflowing_balance_is_an_error() {
        let huge = record(period(1, 2024), -Decimal::MAX, dec!(0), Decimal::MAX);
        let err = RentLedger::entry(&huge, period(1, 2024)).unwrap_err();
        assert!(matches!(err, Error::Calculation(CalculationError::Overflow(_))));

        let next = record(period(2, 2024), dec!(0), dec!(0), dec!(0));
        assert!(RentLedger::check_carry_forward(&huge, &next).is_err());
    }
}

//! Rent domain models.

use std::fmt;

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculationError, Result, ValidationError};
use crate::periods::Period;
use crate::tenants::Tenant;

/// Largest absolute amount a record may carry (10^15).
///
/// Keeps realm-wide sums well inside the range of `Decimal`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7E, 0, false, 0);

fn checked_sum(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| CalculationError::Overflow(what).into())
}

fn checked_diff(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| CalculationError::Overflow(what).into())
}

/// Payment state of one tenant for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentStatus {
    Paid,
    PartiallyPaid,
    NotPaid,
}

impl RentStatus {
    /// Classifies a period, first matching rule wins:
    /// nothing billed or a non-negative balance is `Paid`, any payment
    /// against a remaining debt is `PartiallyPaid`, else `NotPaid`.
    pub fn classify(total_to_pay: Decimal, payment: Decimal, new_balance: Decimal) -> Self {
        if total_to_pay <= Decimal::ZERO || new_balance >= Decimal::ZERO {
            RentStatus::Paid
        } else if payment > Decimal::ZERO {
            RentStatus::PartiallyPaid
        } else {
            RentStatus::NotPaid
        }
    }
}

/// Stored billing and payment state of one tenant for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRecord {
    pub id: String,
    pub realm_id: String,
    pub tenant_id: String,
    pub period: Period,
    /// Amount billed for the period (rent plus charges).
    pub total_to_pay: Decimal,
    /// Amount received for the period.
    pub payment: Decimal,
    /// Signed balance carried in: negative is owed, positive is credit.
    pub balance_brought_forward: Decimal,
    pub payment_date: Option<NaiveDate>,
    pub payment_type: Option<String>,
    pub payment_reference: Option<String>,
    pub description: Option<String>,
}

impl RentRecord {
    /// `balanceBroughtForward + payment - totalToPay`, failing instead of overflowing.
    pub fn new_balance(&self) -> Result<Decimal> {
        let carried = checked_sum(self.balance_brought_forward, self.payment, "new balance")?;
        checked_diff(carried, self.total_to_pay, "new balance")
    }

    pub fn status(&self) -> Result<RentStatus> {
        Ok(RentStatus::classify(
            self.total_to_pay,
            self.payment,
            self.new_balance()?,
        ))
    }
}

/// Input model for writing a rent record, produced by billing runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub realm_id: String,
    pub tenant_id: String,
    pub period: Period,
    pub total_to_pay: Decimal,
    pub payment: Decimal,
    pub balance_brought_forward: Decimal,
    pub payment_date: Option<NaiveDate>,
    pub payment_type: Option<String>,
    pub payment_reference: Option<String>,
    pub description: Option<String>,
}

impl NewRentRecord {
    pub fn validate(&self) -> Result<()> {
        if self.realm_id.trim().is_empty() {
            return Err(ValidationError::MissingField("realmId".to_string()).into());
        }
        if self.tenant_id.trim().is_empty() {
            return Err(ValidationError::MissingField("tenantId".to_string()).into());
        }
        if self.payment < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Payment cannot be negative".to_string(),
            )
            .into());
        }
        for (field, value) in [
            ("totalToPay", self.total_to_pay),
            ("payment", self.payment),
            ("balanceBroughtForward", self.balance_brought_forward),
        ] {
            if value.abs() > MAX_AMOUNT {
                return Err(ValidationError::AmountOutOfRange {
                    field,
                    value: value.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// A derived ledger row: a rent record plus its computed balance and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Stable row identity, `<tenantId>|<month>|<year>`.
    pub uid: String,
    pub tenant_id: String,
    pub period: Period,
    pub total_to_pay: Decimal,
    pub payment: Decimal,
    pub balance_brought_forward: Decimal,
    pub new_balance: Decimal,
    pub status: RentStatus,
    /// Display flag: this row is the period the caller asked about.
    pub is_current_period: bool,
    /// False for placeholder rows standing in for a period with no record.
    pub has_record: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LedgerEntry {
    pub fn uid_for(tenant_id: &str, period: Period) -> String {
        format!("{}|{}|{}", tenant_id, period.month(), period.year())
    }
}

/// A break in the balance carry-forward chain between consecutive periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityWarning {
    pub tenant_id: String,
    /// The later of the two consecutive periods.
    pub period: Period,
    /// New balance of the previous period.
    pub expected_balance: Decimal,
    /// Balance brought forward actually recorded for `period`.
    pub actual_balance: Decimal,
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tenant {} in {}: balance brought forward {} does not match previous new balance {}",
            self.tenant_id, self.period, self.actual_balance, self.expected_balance
        )
    }
}

/// Realm-wide rent statistics for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentSummary {
    pub period: Period,
    pub count_all: usize,
    pub count_paid: usize,
    pub count_partially_paid: usize,
    pub count_not_paid: usize,
    pub total_to_pay: Decimal,
    pub total_paid: Decimal,
    /// Net exposure: the negated sum of new balances. Credits reduce it.
    pub total_not_paid: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<IntegrityWarning>,
}

impl RentSummary {
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            count_all: 0,
            count_paid: 0,
            count_partially_paid: 0,
            count_not_paid: 0,
            total_to_pay: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_not_paid: Decimal::ZERO,
            warnings: Vec::new(),
        }
    }

    /// Folds one entry in. Placeholder entries carry no billing data and are skipped.
    pub fn add_entry(&mut self, entry: &LedgerEntry) -> Result<()> {
        if !entry.has_record {
            return Ok(());
        }
        match entry.status {
            RentStatus::Paid => self.count_paid += 1,
            RentStatus::PartiallyPaid => self.count_partially_paid += 1,
            RentStatus::NotPaid => self.count_not_paid += 1,
        }
        self.count_all += 1;
        self.total_to_pay = checked_sum(self.total_to_pay, entry.total_to_pay, "total to pay")?;
        self.total_paid = checked_sum(self.total_paid, entry.payment, "total paid")?;
        self.total_not_paid = checked_diff(self.total_not_paid, entry.new_balance, "total not paid")?;
        Ok(())
    }

    /// Combines two partial summaries of the same period.
    pub fn merge(mut self, other: RentSummary) -> Result<Self> {
        self.count_all += other.count_all;
        self.count_paid += other.count_paid;
        self.count_partially_paid += other.count_partially_paid;
        self.count_not_paid += other.count_not_paid;
        self.total_to_pay = checked_sum(self.total_to_pay, other.total_to_pay, "total to pay")?;
        self.total_paid = checked_sum(self.total_paid, other.total_paid, "total paid")?;
        self.total_not_paid = checked_sum(self.total_not_paid, other.total_not_paid, "total not paid")?;
        self.warnings.extend(other.warnings);
        Ok(self)
    }

    /// Summarizes entries in parallel; the result does not depend on their order.
    pub fn from_entries(period: Period, entries: &[LedgerEntry]) -> Result<Self> {
        entries
            .par_iter()
            .try_fold(
                || RentSummary::empty(period),
                |mut summary, entry| -> Result<RentSummary> {
                    summary.add_entry(entry)?;
                    Ok(summary)
                },
            )
            .try_reduce(|| RentSummary::empty(period), RentSummary::merge)
    }
}

/// Derived rent rows of a realm for one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentList {
    pub period: Period,
    pub entries: Vec<LedgerEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<IntegrityWarning>,
}

/// One tenant's entry for a period and the carry-forward check against the month before.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRent {
    pub entry: LedgerEntry,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<IntegrityWarning>,
}

/// A tenant's full rent history with the queried period highlighted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRentHistory {
    pub tenant: Tenant,
    pub entries: Vec<LedgerEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<IntegrityWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn new_record(total: Decimal, payment: Decimal, brought: Decimal) -> NewRentRecord {
        NewRentRecord {
            id: None,
            realm_id: "r1".to_string(),
            tenant_id: "t1".to_string(),
            period: Period::new(6, 2024).unwrap(),
            total_to_pay: total,
            payment,
            balance_brought_forward: brought,
            payment_date: None,
            payment_type: None,
            payment_reference: None,
            description: None,
        }
    }

    fn entry(total: Decimal, payment: Decimal, new_balance: Decimal) -> LedgerEntry {
        let period = Period::new(6, 2024).unwrap();
        LedgerEntry {
            uid: LedgerEntry::uid_for("t1", period),
            tenant_id: "t1".to_string(),
            period,
            total_to_pay: total,
            payment,
            balance_brought_forward: Decimal::ZERO,
            new_balance,
            status: RentStatus::classify(total, payment, new_balance),
            is_current_period: true,
            has_record: true,
            payment_date: None,
            payment_type: None,
            payment_reference: None,
            description: None,
        }
    }

    #[test]
    fn validate_bounds_every_amount() {
        assert!(new_record(MAX_AMOUNT, MAX_AMOUNT, -MAX_AMOUNT).validate().is_ok());

        let over = MAX_AMOUNT + dec!(0.01);
        for record in [
            new_record(over, dec!(0), dec!(0)),
            new_record(dec!(0), over, dec!(0)),
            new_record(dec!(0), dec!(0), -over),
        ] {
            let err = record.validate().unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::AmountOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn validate_rejects_negative_payment() {
        let err = new_record(dec!(1000), dec!(-1), dec!(0)).validate().unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));
    }

    #[test]
    fn add_entry_reports_overflow() {
        let mut summary = RentSummary::empty(Period::new(6, 2024).unwrap());
        summary.add_entry(&entry(Decimal::MAX, dec!(0), dec!(0))).unwrap();
        let err = summary
            .add_entry(&entry(dec!(1), dec!(0), dec!(0)))
            .unwrap_err();
        assert!(matches!(err, Error::Calculation(CalculationError::Overflow(_))));
    }

    #[test]
    fn merge_reports_overflow() {
        let period = Period::new(6, 2024).unwrap();
        let left = RentSummary::from_entries(period, &[entry(dec!(0), Decimal::MAX, Decimal::MAX)]).unwrap();
        let right = RentSummary::from_entries(period, &[entry(dec!(0), dec!(1), dec!(1))]).unwrap();
        assert!(left.merge(right).is_err());
    }
}

//! Database models for rent records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rentledger_core::rents::{NewRentRecord, RentRecord};

use crate::errors::StorageError;
use crate::utils::{parse_decimal, period_columns, period_from_columns};

/// One stored rent record. Amounts are decimals rendered as TEXT.
#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::rent_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RentRecordDB {
    pub id: String,
    pub realm_id: String,
    pub tenant_id: String,
    pub year: i32,
    pub month: i32,
    pub total_to_pay: String,
    pub payment: String,
    pub balance_brought_forward: String,
    pub payment_date: Option<NaiveDate>,
    pub payment_type: Option<String>,
    pub payment_reference: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Columns rewritten when a billing run replaces an existing record.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::rent_records)]
#[diesel(treat_none_as_null = true)]
pub struct RentRecordChangesDB {
    pub total_to_pay: String,
    pub payment: String,
    pub balance_brought_forward: String,
    pub payment_date: Option<NaiveDate>,
    pub payment_type: Option<String>,
    pub payment_reference: Option<String>,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<RentRecordDB> for RentRecord {
    type Error = StorageError;

    fn try_from(db: RentRecordDB) -> Result<Self, Self::Error> {
        Ok(Self {
            period: period_from_columns(db.year, db.month)?,
            total_to_pay: parse_decimal("total_to_pay", &db.total_to_pay)?,
            payment: parse_decimal("payment", &db.payment)?,
            balance_brought_forward: parse_decimal(
                "balance_brought_forward",
                &db.balance_brought_forward,
            )?,
            id: db.id,
            realm_id: db.realm_id,
            tenant_id: db.tenant_id,
            payment_date: db.payment_date,
            payment_type: db.payment_type,
            payment_reference: db.payment_reference,
            description: db.description,
        })
    }
}

impl RentRecordDB {
    /// Builds a fresh row for `record` under the given id.
    pub fn new_row(id: String, record: NewRentRecord, now: NaiveDateTime) -> Self {
        let (year, month) = period_columns(record.period);
        Self {
            id,
            realm_id: record.realm_id,
            tenant_id: record.tenant_id,
            year,
            month,
            total_to_pay: record.total_to_pay.to_string(),
            payment: record.payment.to_string(),
            balance_brought_forward: record.balance_brought_forward.to_string(),
            payment_date: record.payment_date,
            payment_type: record.payment_type,
            payment_reference: record.payment_reference,
            description: record.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl RentRecordChangesDB {
    pub fn from_new(record: NewRentRecord, now: NaiveDateTime) -> Self {
        Self {
            total_to_pay: record.total_to_pay.to_string(),
            payment: record.payment.to_string(),
            balance_brought_forward: record.balance_brought_forward.to_string(),
            payment_date: record.payment_date,
            payment_type: record.payment_type,
            payment_reference: record.payment_reference,
            description: record.description,
            updated_at: now,
        }
    }
}

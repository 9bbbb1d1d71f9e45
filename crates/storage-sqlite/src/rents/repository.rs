use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use rentledger_core::errors::NotFoundError;
use rentledger_core::rents::{NewRentRecord, RentRecord, RentRecordRepositoryTrait};
use rentledger_core::{Error, Period, Result};
use uuid::Uuid;

use super::model::{RentRecordChangesDB, RentRecordDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{rent_records, tenants};
use crate::utils::period_columns;

pub struct RentRecordRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn into_records(rows: Vec<RentRecordDB>) -> Result<Vec<RentRecord>> {
    rows.into_iter()
        .map(|row| RentRecord::try_from(row).map_err(Error::from))
        .collect()
}

impl RentRecordRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn find_record_impl(&self, tenant_id: &str, period: Period) -> Result<Option<RentRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let (year, month) = period_columns(period);
        let row = rent_records::table
            .filter(rent_records::tenant_id.eq(tenant_id))
            .filter(rent_records::year.eq(year))
            .filter(rent_records::month.eq(month))
            .select(RentRecordDB::as_select())
            .first::<RentRecordDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(|r| RentRecord::try_from(r).map_err(Error::from))
            .transpose()
    }

    fn find_records_for_realm_impl(&self, realm_id: &str, period: Period) -> Result<Vec<RentRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let (year, month) = period_columns(period);
        let rows = rent_records::table
            .filter(rent_records::realm_id.eq(realm_id))
            .filter(rent_records::year.eq(year))
            .filter(rent_records::month.eq(month))
            .select(RentRecordDB::as_select())
            .order(rent_records::tenant_id.asc())
            .load::<RentRecordDB>(&mut conn)
            .into_core()?;
        into_records(rows)
    }

    fn find_record_history_impl(&self, tenant_id: &str) -> Result<Vec<RentRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = rent_records::table
            .filter(rent_records::tenant_id.eq(tenant_id))
            .select(RentRecordDB::as_select())
            .order((rent_records::year.asc(), rent_records::month.asc()))
            .load::<RentRecordDB>(&mut conn)
            .into_core()?;
        into_records(rows)
    }
}

#[async_trait]
impl RentRecordRepositoryTrait for RentRecordRepository {
    async fn find_record(&self, tenant_id: &str, period: Period) -> Result<Option<RentRecord>> {
        self.find_record_impl(tenant_id, period)
    }

    async fn find_records_for_realm(&self, realm_id: &str, period: Period) -> Result<Vec<RentRecord>> {
        self.find_records_for_realm_impl(realm_id, period)
    }

    async fn find_record_history(&self, tenant_id: &str) -> Result<Vec<RentRecord>> {
        self.find_record_history_impl(tenant_id)
    }

    /// Writes the record of a tenant for one period, replacing any existing one.
    ///
    /// The tenant must belong to the record's realm.
    async fn upsert_record(&self, record: NewRentRecord) -> Result<RentRecord> {
        record.validate()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RentRecord> {
                let tenant_realm = tenants::table
                    .find(&record.tenant_id)
                    .select(tenants::realm_id)
                    .first::<String>(conn)
                    .optional()
                    .into_core()?;
                if tenant_realm.as_deref() != Some(record.realm_id.as_str()) {
                    return Err(NotFoundError::Tenant {
                        realm_id: record.realm_id.clone(),
                        tenant_id: record.tenant_id.clone(),
                    }
                    .into());
                }

                let (year, month) = period_columns(record.period);
                let existing_id = rent_records::table
                    .filter(rent_records::tenant_id.eq(&record.tenant_id))
                    .filter(rent_records::year.eq(year))
                    .filter(rent_records::month.eq(month))
                    .select(rent_records::id)
                    .first::<String>(conn)
                    .optional()
                    .into_core()?;

                let now = chrono::Utc::now().naive_utc();
                let saved = match existing_id {
                    Some(existing_id) => {
                        debug!(
                            "Replacing rent record {} of tenant {} for {}",
                            existing_id, record.tenant_id, record.period
                        );
                        diesel::update(rent_records::table.find(existing_id))
                            .set(RentRecordChangesDB::from_new(record, now))
                            .returning(RentRecordDB::as_returning())
                            .get_result(conn)
                            .into_core()?
                    }
                    None => {
                        let id = record
                            .id
                            .clone()
                            .unwrap_or_else(|| Uuid::new_v4().to_string());
                        diesel::insert_into(rent_records::table)
                            .values(RentRecordDB::new_row(id, record, now))
                            .returning(RentRecordDB::as_returning())
                            .get_result(conn)
                            .into_core()?
                    }
                };
                Ok(RentRecord::try_from(saved)?)
            })
            .await
    }
}

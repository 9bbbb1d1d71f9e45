//! Rent record store and rent service traits.

use async_trait::async_trait;

use super::rents_model::{
    NewRentRecord, RentList, RentRecord, RentSummary, TenantRent, TenantRentHistory,
};
use crate::errors::Result;
use crate::periods::Period;

/// Persistence contract for rent records.
///
/// At most one record exists per (tenant, period). A missing record means
/// billing has not run, not a zero amount.
#[async_trait]
pub trait RentRecordRepositoryTrait: Send + Sync {
    /// The record of one tenant for one period, if billed.
    async fn find_record(&self, tenant_id: &str, period: Period) -> Result<Option<RentRecord>>;

    /// Every record of a realm for one period.
    async fn find_records_for_realm(&self, realm_id: &str, period: Period) -> Result<Vec<RentRecord>>;

    /// Every record of a tenant, ascending by period.
    async fn find_record_history(&self, tenant_id: &str) -> Result<Vec<RentRecord>>;

    /// Inserts or replaces the record of (tenant, period). Used by billing runs.
    async fn upsert_record(&self, record: NewRentRecord) -> Result<RentRecord>;
}

/// Read operations of the rent ledger. Every call is scoped to one realm.
#[async_trait]
pub trait RentServiceTrait: Send + Sync {
    /// Realm-wide counts and totals for a period.
    async fn summarize(&self, realm_id: &str, period: Period) -> Result<RentSummary>;

    /// Monthly summaries for all twelve months of a year.
    async fn summarize_year(&self, realm_id: &str, year: i32) -> Result<Vec<RentSummary>>;

    /// Derived rent rows of the realm for a period, sorted by tenant name.
    async fn rent_list(&self, realm_id: &str, period: Period) -> Result<RentList>;

    /// One tenant's entry for a period, checked against the previous period's
    /// record. `None` when there is no record and the tenant was inactive then.
    async fn tenant_rent(
        &self,
        realm_id: &str,
        tenant_id: &str,
        period: Period,
    ) -> Result<Option<TenantRent>>;

    /// One tenant's whole history with `period` flagged as current.
    async fn tenant_rent_history(
        &self,
        realm_id: &str,
        tenant_id: &str,
        period: Period,
    ) -> Result<TenantRentHistory>;
}

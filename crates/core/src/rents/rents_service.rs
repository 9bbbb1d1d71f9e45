use async_trait::async_trait;
use futures::future::try_join_all;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::ledger::RentLedger;
use super::rents_model::{
    IntegrityWarning, LedgerEntry, RentList, RentRecord, RentSummary, TenantRent,
    TenantRentHistory,
};
use super::rents_traits::{RentRecordRepositoryTrait, RentServiceTrait};
use crate::errors::{NotFoundError, Result};
use crate::periods::Period;
use crate::realms::{require_realm, RealmRepositoryTrait};
use crate::tenants::{Tenant, TenantRepositoryTrait};

/// Aggregates rent ledgers across a realm.
///
/// Holds no state between calls; every operation re-reads the stores.
pub struct RentService {
    realm_repository: Arc<dyn RealmRepositoryTrait>,
    tenant_repository: Arc<dyn TenantRepositoryTrait>,
    rent_repository: Arc<dyn RentRecordRepositoryTrait>,
}

impl RentService {
    pub fn new(
        realm_repository: Arc<dyn RealmRepositoryTrait>,
        tenant_repository: Arc<dyn TenantRepositoryTrait>,
        rent_repository: Arc<dyn RentRecordRepositoryTrait>,
    ) -> Self {
        Self {
            realm_repository,
            tenant_repository,
            rent_repository,
        }
    }

    /// Loads and derives the entries of a realm for one period.
    ///
    /// Records of tenants outside the realm, or of tenants inactive in the
    /// period, are left out. Tenants without a record are left out as well.
    async fn load_entries(
        &self,
        realm_id: &str,
        period: Period,
    ) -> Result<(Vec<(Tenant, LedgerEntry)>, Vec<IntegrityWarning>)> {
        let (tenants, records, prior_records) = futures::try_join!(
            self.tenant_repository.find_all_tenants(realm_id),
            self.rent_repository.find_records_for_realm(realm_id, period),
            self.rent_repository
                .find_records_for_realm(realm_id, period.previous()),
        )?;

        let tenants_by_id: HashMap<&str, &Tenant> =
            tenants.iter().map(|t| (t.id.as_str(), t)).collect();
        let prior_by_tenant: HashMap<&str, &RentRecord> = prior_records
            .iter()
            .filter(|r| r.realm_id == realm_id)
            .map(|r| (r.tenant_id.as_str(), r))
            .collect();

        let mut entries = Vec::with_capacity(records.len());
        let mut warnings = Vec::new();
        for record in &records {
            if record.realm_id != realm_id {
                warn!(
                    "Ignoring rent record {} of realm {} while reading realm {}",
                    record.id, record.realm_id, realm_id
                );
                continue;
            }
            let Some(tenant) = tenants_by_id.get(record.tenant_id.as_str()) else {
                warn!(
                    "Ignoring rent record {} for unknown tenant {} in realm {}",
                    record.id, record.tenant_id, realm_id
                );
                continue;
            };
            if !tenant.is_active_in(period) {
                debug!(
                    "Skipping rent record {}: tenant {} inactive in {}",
                    record.id, tenant.id, period
                );
                continue;
            }
            if let Some(prior) = prior_by_tenant.get(record.tenant_id.as_str()) {
                warnings.extend(RentLedger::check_carry_forward(prior, record)?);
            }
            entries.push(((*tenant).clone(), RentLedger::entry(record, period)?));
        }
        Ok((entries, warnings))
    }

    async fn summarize_resolved(&self, realm_id: &str, period: Period) -> Result<RentSummary> {
        let (entries, warnings) = self.load_entries(realm_id, period).await?;
        let entries: Vec<LedgerEntry> = entries.into_iter().map(|(_, entry)| entry).collect();
        let mut summary = RentSummary::from_entries(period, &entries)?;
        summary.warnings = warnings;
        debug!(
            "Rent summary for realm {} in {}: {} paid, {} partially paid, {} not paid",
            realm_id,
            period,
            summary.count_paid,
            summary.count_partially_paid,
            summary.count_not_paid
        );
        Ok(summary)
    }

    async fn require_tenant(&self, realm_id: &str, tenant_id: &str) -> Result<Tenant> {
        require_realm(self.realm_repository.as_ref(), realm_id).await?;
        self.tenant_repository
            .find_tenant(realm_id, tenant_id)
            .await?
            .filter(|t| t.realm_id == realm_id)
            .ok_or_else(|| {
                NotFoundError::Tenant {
                    realm_id: realm_id.to_string(),
                    tenant_id: tenant_id.to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl RentServiceTrait for RentService {
    async fn summarize(&self, realm_id: &str, period: Period) -> Result<RentSummary> {
        require_realm(self.realm_repository.as_ref(), realm_id).await?;
        self.summarize_resolved(realm_id, period).await
    }

    async fn summarize_year(&self, realm_id: &str, year: i32) -> Result<Vec<RentSummary>> {
        // Validates the year before touching any store.
        Period::new(1, year)?;
        require_realm(self.realm_repository.as_ref(), realm_id).await?;
        let months = Period::months_of(year);
        try_join_all(
            months
                .into_iter()
                .map(|period| self.summarize_resolved(realm_id, period)),
        )
        .await
    }

    async fn rent_list(&self, realm_id: &str, period: Period) -> Result<RentList> {
        require_realm(self.realm_repository.as_ref(), realm_id).await?;
        let (mut rows, warnings) = self.load_entries(realm_id, period).await?;
        rows.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(RentList {
            period,
            entries: rows.into_iter().map(|(_, entry)| entry).collect(),
            warnings,
        })
    }

    async fn tenant_rent(
        &self,
        realm_id: &str,
        tenant_id: &str,
        period: Period,
    ) -> Result<Option<TenantRent>> {
        let tenant = self.require_tenant(realm_id, tenant_id).await?;
        let (record, prior) = futures::try_join!(
            self.rent_repository.find_record(&tenant.id, period),
            self.rent_repository.find_record(&tenant.id, period.previous()),
        )?;
        let record = record.filter(|r| r.realm_id == realm_id);
        let prior = prior.filter(|r| r.realm_id == realm_id);
        let warnings: Vec<IntegrityWarning> = match (prior.as_ref(), record.as_ref()) {
            (Some(prior), Some(record)) => RentLedger::check_carry_forward(prior, record)?
                .into_iter()
                .collect(),
            _ => Vec::new(),
        };
        Ok(RentLedger::derive(&tenant, record.as_ref(), period, period)?
            .map(|entry| TenantRent { entry, warnings }))
    }

    async fn tenant_rent_history(
        &self,
        realm_id: &str,
        tenant_id: &str,
        period: Period,
    ) -> Result<TenantRentHistory> {
        let tenant = self.require_tenant(realm_id, tenant_id).await?;
        let records: Vec<RentRecord> = self
            .rent_repository
            .find_record_history(&tenant.id)
            .await?
            .into_iter()
            .filter(|r| r.realm_id == realm_id)
            .collect();
        let history = RentLedger::history(tenant, records, period)?;
        debug!(
            "Rent history for tenant {}: {} entries, {} warnings",
            tenant_id,
            history.entries.len(),
            history.warnings.len()
        );
        Ok(history)
    }
}

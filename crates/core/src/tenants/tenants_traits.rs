//! Tenant directory and service traits.

use async_trait::async_trait;

use super::tenants_model::{Tenant, TenantOverview};
use crate::errors::Result;

/// Read access to the tenant directory. Every query is scoped to one realm.
///
/// Activity depends on the period asked about, so callers filter
/// `find_all_tenants` with [`Tenant::is_active_in`].
#[async_trait]
pub trait TenantRepositoryTrait: Send + Sync {
    /// Every tenant of the realm, terminated or not.
    async fn find_all_tenants(&self, realm_id: &str) -> Result<Vec<Tenant>>;

    /// One tenant, only if it belongs to `realm_id`.
    async fn find_tenant(&self, realm_id: &str, tenant_id: &str) -> Result<Option<Tenant>>;
}

#[async_trait]
pub trait TenantServiceTrait: Send + Sync {
    /// Counts of active and terminated tenancies in a realm.
    async fn get_overview(&self, realm_id: &str) -> Result<TenantOverview>;

    /// All tenants of a realm, sorted by name.
    async fn list_tenants(&self, realm_id: &str) -> Result<Vec<Tenant>>;

    /// One tenant of a realm; `NotFoundError::Tenant` when it belongs elsewhere.
    async fn get_tenant(&self, realm_id: &str, tenant_id: &str) -> Result<Tenant>;
}

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::tenants_model::{Tenant, TenantOverview};
use super::tenants_traits::{TenantRepositoryTrait, TenantServiceTrait};
use crate::errors::{NotFoundError, Result};
use crate::realms::{require_realm, RealmRepositoryTrait};

/// Period-independent tenant reads for a realm.
pub struct TenantService {
    realm_repository: Arc<dyn RealmRepositoryTrait>,
    tenant_repository: Arc<dyn TenantRepositoryTrait>,
}

impl TenantService {
    pub fn new(
        realm_repository: Arc<dyn RealmRepositoryTrait>,
        tenant_repository: Arc<dyn TenantRepositoryTrait>,
    ) -> Self {
        Self {
            realm_repository,
            tenant_repository,
        }
    }
}

#[async_trait]
impl TenantServiceTrait for TenantService {
    async fn get_overview(&self, realm_id: &str) -> Result<TenantOverview> {
        require_realm(self.realm_repository.as_ref(), realm_id).await?;
        let tenants = self.tenant_repository.find_all_tenants(realm_id).await?;
        let overview = TenantOverview::from_tenants(&tenants);
        debug!(
            "Tenant overview for realm {}: {} active, {} inactive",
            realm_id, overview.count_active, overview.count_inactive
        );
        Ok(overview)
    }

    async fn list_tenants(&self, realm_id: &str) -> Result<Vec<Tenant>> {
        require_realm(self.realm_repository.as_ref(), realm_id).await?;
        let mut tenants = self.tenant_repository.find_all_tenants(realm_id).await?;
        tenants.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(tenants)
    }

    async fn get_tenant(&self, realm_id: &str, tenant_id: &str) -> Result<Tenant> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::realms::Realm;
    use chrono::NaiveDate;

    struct MockRealmRepository;

    #[async_trait]
    impl RealmRepositoryTrait for MockRealmRepository {
        async fn resolve_realm(&self, realm_id: &str) -> Result<Option<Realm>> {
            Ok((realm_id == "r1").then(|| Realm {
                id: "r1".to_string(),
                name: "Acme".to_string(),
                members: Vec::new(),
            }))
        }

        async fn find_realms_for_member(&self, _email: &str) -> Result<Vec<Realm>> {
            unimplemented!()
        }
    }

    struct MockTenantRepository {
        tenants: Vec<Tenant>,
    }

    #[async_trait]
    impl TenantRepositoryTrait for MockTenantRepository {
        async fn find_all_tenants(&self, realm_id: &str) -> Result<Vec<Tenant>> {
            Ok(self
                .tenants
                .iter()
                .filter(|t| t.realm_id == realm_id)
                .cloned()
                .collect())
        }

        async fn find_tenant(&self, _realm_id: &str, _tenant_id: &str) -> Result<Option<Tenant>> {
            unimplemented!()
        }
    }

    fn tenant(id: &str, terminated: bool) -> Tenant {
        Tenant {
            id: id.to_string(),
            realm_id: "r1".to_string(),
            name: format!("Tenant {}", id),
            begin_date: None,
            end_date: None,
            termination_date: terminated.then(|| NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
        }
    }

    fn service() -> TenantService {
        TenantService::new(
            Arc::new(MockRealmRepository),
            Arc::new(MockTenantRepository {
                tenants: vec![
                    tenant("e", false),
                    tenant("d", true),
                    tenant("c", true),
                    tenant("b", false),
                    tenant("a", true),
                ],
            }),
        )
    }

    #[tokio::test]
    async fn overview_counts_active_and_terminated() {
        let overview = service().get_overview("r1").await.unwrap();
        assert_eq!(overview.count_all, 5);
        assert_eq!(overview.count_active, 2);
        assert_eq!(overview.count_inactive, 3);
    }

    #[tokio::test]
    async fn overview_of_unknown_realm_fails() {
        let err = service().get_overview("r2").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(NotFoundError::Realm(_))));
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let tenants = service().list_tenants("r1").await.unwrap();
        let ids: Vec<&str> = tenants.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn get_tenant_is_scoped_to_realm() {
        let tenant = service().get_tenant("r1", "d").await.unwrap();
        assert_eq!(tenant.name, "Tenant d");

        let err = service().get_tenant("r1", "zz").await.unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound(NotFoundError::Tenant { ref tenant_id, .. }) if tenant_id == "zz"
        ));
        let err = service().get_tenant("r2", "d").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(NotFoundError::Realm(_))));
    }
}

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::properties_model::{Property, PropertyOverview};
use super::properties_traits::{PropertyRepositoryTrait, PropertyServiceTrait};
use crate::errors::Result;
use crate::realms::{require_realm, RealmRepositoryTrait};

pub struct PropertyService {
    realm_repository: Arc<dyn RealmRepositoryTrait>,
    property_repository: Arc<dyn PropertyRepositoryTrait>,
}

impl PropertyService {
    pub fn new(
        realm_repository: Arc<dyn RealmRepositoryTrait>,
        property_repository: Arc<dyn PropertyRepositoryTrait>,
    ) -> Self {
        Self {
            realm_repository,
            property_repository,
        }
    }
}

#[async_trait]
impl PropertyServiceTrait for PropertyService {
    async fn get_overview(&self, realm_id: &str) -> Result<PropertyOverview> {
        require_realm(self.realm_repository.as_ref(), realm_id).await?;
        let properties = self
            .property_repository
            .find_all_properties(realm_id)
            .await?;
        let overview = PropertyOverview::from_properties(&properties);
        debug!(
            "Property overview for realm {}: {} free, {} busy",
            realm_id, overview.count_free, overview.count_busy
        );
        Ok(overview)
    }

    async fn list_properties(&self, realm_id: &str) -> Result<Vec<Property>> {
        require_realm(self.realm_repository.as_ref(), realm_id).await?;
        let mut properties = self
            .property_repository
            .find_all_properties(realm_id)
            .await?;
        properties.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DatabaseError, Error};
    use crate::realms::Realm;
    use rust_decimal_macros::dec;

    struct MockRealmRepository;

    #[async_trait]
    impl RealmRepositoryTrait for MockRealmRepository {
        async fn resolve_realm(&self, realm_id: &str) -> Result<Option<Realm>> {
            Ok(Some(Realm {
                id: realm_id.to_string(),
                name: "Acme".to_string(),
                members: Vec::new(),
            }))
        }

        async fn find_realms_for_member(&self, _email: &str) -> Result<Vec<Realm>> {
            unimplemented!()
        }
    }

    struct MockPropertyRepository {
        properties: Vec<Property>,
        broken: bool,
    }

    #[async_trait]
    impl PropertyRepositoryTrait for MockPropertyRepository {
        async fn find_all_properties(&self, realm_id: &str) -> Result<Vec<Property>> {
            if self.broken {
                return Err(Error::Database(DatabaseError::ConnectionFailed(
                    "unavailable".to_string(),
                )));
            }
            Ok(self
                .properties
                .iter()
                .filter(|p| p.realm_id == realm_id)
                .cloned()
                .collect())
        }
    }

    fn property(id: &str, realm_id: &str, available: bool) -> Property {
        Property {
            id: id.to_string(),
            realm_id: realm_id.to_string(),
            name: format!("Unit {}", id),
            property_type: Some("apartment".to_string()),
            price: Some(dec!(850)),
            available,
        }
    }

    fn service(broken: bool) -> PropertyService {
        PropertyService::new(
            Arc::new(MockRealmRepository),
            Arc::new(MockPropertyRepository {
                properties: vec![
                    property("1", "r1", true),
                    property("2", "r1", false),
                    property("3", "r1", false),
                    property("4", "r2", true),
                ],
                broken,
            }),
        )
    }

    #[tokio::test]
    async fn overview_counts_only_the_requested_realm() {
        let overview = service(false).get_overview("r1").await.unwrap();
        assert_eq!(
            overview,
            PropertyOverview {
                count_all: 3,
                count_free: 1,
                count_busy: 2,
            }
        );
    }

    #[tokio::test]
    async fn overview_propagates_store_errors() {
        let err = service(true).get_overview("r1").await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::ConnectionFailed(_))));
    }
}

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::realms_model::Realm;
use super::realms_traits::{RealmRepositoryTrait, RealmServiceTrait};
use crate::errors::{NotFoundError, Result};

/// Realm reads on behalf of an authenticated account.
pub struct RealmService {
    realm_repository: Arc<dyn RealmRepositoryTrait>,
}

impl RealmService {
    pub fn new(realm_repository: Arc<dyn RealmRepositoryTrait>) -> Self {
        Self { realm_repository }
    }
}

#[async_trait]
impl RealmServiceTrait for RealmService {
    async fn list_realms_for_member(&self, email: &str) -> Result<Vec<Realm>> {
        if email.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut realms = self.realm_repository.find_realms_for_member(email).await?;
        realms.retain(|r| r.has_member(email));
        realms.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(realms)
    }

    async fn get_member_realm(&self, email: &str, realm_id: &str) -> Result<Realm> {
        match self.realm_repository.resolve_realm(realm_id).await? {
            Some(realm) if realm.has_member(email) => Ok(realm),
            Some(_) => {
                // Indistinguishable from a missing realm to the caller.
                debug!("Account {} is not a member of realm {}", email, realm_id);
                Err(NotFoundError::Realm(realm_id.to_string()).into())
            }
            None => Err(NotFoundError::Realm(realm_id.to_string()).into()),
        }
    }
}

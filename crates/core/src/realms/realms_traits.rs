//! Realm directory and service traits.

use async_trait::async_trait;

use super::realms_model::Realm;
use crate::errors::{NotFoundError, Result};

/// Read access to the realm directory.
#[async_trait]
pub trait RealmRepositoryTrait: Send + Sync {
    /// Resolves a realm by ID. Returns `None` for unknown realms.
    async fn resolve_realm(&self, realm_id: &str) -> Result<Option<Realm>>;

    /// Lists the realms an account is a member of.
    async fn find_realms_for_member(&self, email: &str) -> Result<Vec<Realm>>;
}

/// Realm operations exposed to callers.
#[async_trait]
pub trait RealmServiceTrait: Send + Sync {
    /// Realms the account may act in, sorted by name.
    async fn list_realms_for_member(&self, email: &str) -> Result<Vec<Realm>>;

    /// The realm `realm_id`, provided the account is one of its members.
    async fn get_member_realm(&self, email: &str, realm_id: &str) -> Result<Realm>;
}

/// Resolves a realm or fails with [`NotFoundError::Realm`].
pub async fn require_realm(repository: &dyn RealmRepositoryTrait, realm_id: &str) -> Result<Realm> {
    repository
        .resolve_realm(realm_id)
        .await?
        .ok_or_else(|| NotFoundError::Realm(realm_id.to_string()).into())
}

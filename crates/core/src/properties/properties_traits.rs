//! Property directory and service traits.

use async_trait::async_trait;

use super::properties_model::{Property, PropertyOverview};
use crate::errors::Result;

/// Read access to the property directory.
#[async_trait]
pub trait PropertyRepositoryTrait: Send + Sync {
    async fn find_all_properties(&self, realm_id: &str) -> Result<Vec<Property>>;
}

#[async_trait]
pub trait PropertyServiceTrait: Send + Sync {
    /// Counts of free and occupied properties in a realm.
    async fn get_overview(&self, realm_id: &str) -> Result<PropertyOverview>;

    /// All properties of a realm, sorted by name.
    async fn list_properties(&self, realm_id: &str) -> Result<Vec<Property>>;
}

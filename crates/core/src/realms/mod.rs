//! Realms - the isolation boundary every query is scoped to.

mod realms_model;
mod realms_service;
mod realms_traits;

pub use realms_model::Realm;
pub use realms_service::RealmService;
pub use realms_traits::{require_realm, RealmRepositoryTrait, RealmServiceTrait};

//! Tenants module - read models, directory trait, and overview counting.

mod tenants_model;
mod tenants_service;
mod tenants_traits;

pub use tenants_model::{Tenant, TenantOverview};
pub use tenants_service::TenantService;
pub use tenants_traits::{TenantRepositoryTrait, TenantServiceTrait};

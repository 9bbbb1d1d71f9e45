use std::sync::Arc;

use rentledger_core::{
    properties::{PropertyService, PropertyServiceTrait},
    realms::{RealmService, RealmServiceTrait},
    rents::{RentService, RentServiceTrait},
    tenants::{TenantService, TenantServiceTrait},
};
use rentledger_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, PropertyRepository, RealmRepository,
    RentRecordRepository, TenantRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::AuthManager,
    config::{Config, LogFormat},
};

pub struct AppState {
    pub realm_service: Arc<dyn RealmServiceTrait>,
    pub tenant_service: Arc<dyn TenantServiceTrait>,
    pub property_service: Arc<dyn PropertyServiceTrait>,
    pub rent_service: Arc<dyn RentServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let realm_repository = Arc::new(RealmRepository::new(pool.clone(), writer.clone()));
    let tenant_repository = Arc::new(TenantRepository::new(pool.clone(), writer.clone()));
    let property_repository = Arc::new(PropertyRepository::new(pool.clone(), writer.clone()));
    let rent_repository = Arc::new(RentRecordRepository::new(pool.clone(), writer));

    let realm_service: Arc<dyn RealmServiceTrait> =
        Arc::new(RealmService::new(realm_repository.clone()));
    let tenant_service: Arc<dyn TenantServiceTrait> = Arc::new(TenantService::new(
        realm_repository.clone(),
        tenant_repository.clone(),
    ));
    let property_service: Arc<dyn PropertyServiceTrait> = Arc::new(PropertyService::new(
        realm_repository.clone(),
        property_repository,
    ));
    let rent_service: Arc<dyn RentServiceTrait> = Arc::new(RentService::new(
        realm_repository,
        tenant_repository,
        rent_repository,
    ));

    Ok(Arc::new(AppState {
        realm_service,
        tenant_service,
        property_service,
        rent_service,
        auth: Arc::new(AuthManager::new(&config.access_token_secret)),
    }))
}

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{auth, config::Config, main_lib::AppState};

pub mod accounting;
pub mod health;
pub mod properties;
pub mod realms;
pub mod rents;
pub mod tenants;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        realms::list_realms,
        realms::get_realm,
        realms::get_owner,
        tenants::list_tenants,
        tenants::get_tenants_overview,
        tenants::get_tenant,
        properties::list_properties,
        properties::get_properties_overview,
        rents::list_rents,
        rents::list_rents_for_period,
        rents::get_rents_overview,
        rents::get_tenant_rent_history,
        rents::get_tenant_rent,
        accounting::get_accounting,
    ),
    tags((name = "rentledger"))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let realm_scoped = Router::new()
        .merge(realms::owner_router())
        .merge(tenants::router())
        .merge(properties::router())
        .merge(rents::router())
        .merge(accounting::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_realm,
        ));

    let authenticated = Router::new()
        .merge(realms::router())
        .merge(realm_scoped)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_jwt,
        ));

    let api = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/openapi.json", get(openapi))
        .merge(authenticated);

    Router::new()
        .nest("/api/v2", api)
        .with_state(state)
        .layer(cors_layer(config))
        // Later layers wrap earlier ones: the id is set before it is propagated.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use rentledger_core::tenants::{Tenant, TenantOverview};

use crate::{auth::RealmContext, error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/v2/tenants", responses((status = 200, description = "Tenants of the realm, by name")))]
pub async fn list_tenants(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
) -> ApiResult<Json<Vec<Tenant>>> {
    let tenants = state.tenant_service.list_tenants(&ctx.realm.id).await?;
    Ok(Json(tenants))
}

#[utoipa::path(get, path = "/api/v2/tenants/overview", responses((status = 200, description = "Active and inactive tenant counts")))]
pub async fn get_tenants_overview(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
) -> ApiResult<Json<TenantOverview>> {
    let overview = state.tenant_service.get_overview(&ctx.realm.id).await?;
    Ok(Json(overview))
}

#[utoipa::path(get, path = "/api/v2/tenants/{id}", responses((status = 200, description = "One tenant of the realm"), (status = 404, description = "Unknown realm or tenant")))]
pub async fn get_tenant(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
    Path(tenant_id): Path<String>,
) -> ApiResult<Json<Tenant>> {
    let tenant = state
        .tenant_service
        .get_tenant(&ctx.realm.id, &tenant_id)
        .await?;
    Ok(Json(tenant))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tenants", get(list_tenants))
        .route("/tenants/overview", get(get_tenants_overview))
        .route("/tenants/{id}", get(get_tenant))
}

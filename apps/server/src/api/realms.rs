use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use rentledger_core::realms::Realm;

use crate::{
    auth::{AuthenticatedAccount, RealmContext},
    error::ApiResult,
    main_lib::AppState,
};

/// Realms the caller is a member of.
#[utoipa::path(get, path = "/api/v2/realms", responses((status = 200, description = "Realms of the caller"), (status = 401, description = "Missing or invalid token")))]
pub async fn list_realms(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
) -> ApiResult<Json<Vec<Realm>>> {
    let realms = state
        .realm_service
        .list_realms_for_member(&account.email)
        .await?;
    Ok(Json(realms))
}

/// One realm of the caller. Realms they are not a member of answer 404.
#[utoipa::path(get, path = "/api/v2/realms/{id}", responses((status = 200, description = "Realm of the caller"), (status = 401, description = "Missing or invalid token"), (status = 404, description = "Unknown realm")))]
pub async fn get_realm(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(realm_id): Path<String>,
) -> ApiResult<Json<Realm>> {
    let realm = state
        .realm_service
        .get_member_realm(&account.email, &realm_id)
        .await?;
    Ok(Json(realm))
}

/// The realm selected by the `organizationid` header.
#[utoipa::path(get, path = "/api/v2/owner", responses((status = 200, description = "Selected realm"), (status = 404, description = "Unknown realm or tenant")))]
pub async fn get_owner(Extension(ctx): Extension<RealmContext>) -> Json<Realm> {
    Json(ctx.realm)
}

/// Routes that need a token but no realm.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/realms", get(list_realms))
        .route("/realms/{id}", get(get_realm))
}

pub fn owner_router() -> Router<Arc<AppState>> {
    Router::new().route("/owner", get(get_owner))
}

use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use rentledger_core::properties::{Property, PropertyOverview};

use crate::{auth::RealmContext, error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/v2/properties", responses((status = 200, description = "Properties of the realm")))]
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
) -> ApiResult<Json<Vec<Property>>> {
    let properties = state.property_service.list_properties(&ctx.realm.id).await?;
    Ok(Json(properties))
}

#[utoipa::path(get, path = "/api/v2/properties/overview", responses((status = 200, description = "Free and busy property counts")))]
pub async fn get_properties_overview(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
) -> ApiResult<Json<PropertyOverview>> {
    let overview = state.property_service.get_overview(&ctx.realm.id).await?;
    Ok(Json(overview))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/properties", get(list_properties))
        .route("/properties/overview", get(get_properties_overview))
}

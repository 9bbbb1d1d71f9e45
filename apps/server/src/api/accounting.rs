use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use rentledger_core::rents::RentSummary;

use super::rents::parse_year;
use crate::{auth::RealmContext, error::ApiResult, main_lib::AppState};

/// Twelve monthly summaries, January first.
#[utoipa::path(get, path = "/api/v2/accounting/{year}", responses((status = 200, description = "Monthly rent summaries of a year"), (status = 400, description = "Invalid period")))]
pub async fn get_accounting(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
    Path(year): Path<String>,
) -> ApiResult<Json<Vec<RentSummary>>> {
    let year = parse_year(&year)?;
    let summaries = state.rent_service.summarize_year(&ctx.realm.id, year).await?;
    Ok(Json(summaries))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/accounting/{year}", get(get_accounting))
}

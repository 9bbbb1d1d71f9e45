use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use rentledger_core::errors::ValidationError;
use rentledger_core::rents::{RentList, RentSummary, TenantRent, TenantRentHistory};
use rentledger_core::{Period, PeriodCalendar};
use serde::Deserialize;

use crate::{auth::RealmContext, error::ApiResult, main_lib::AppState};

/// Optional `month`/`year` query pair.
///
/// Kept as raw strings so malformed values fall back to the current month
/// instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl PeriodQuery {
    pub fn period(&self) -> Period {
        PeriodCalendar::normalize_raw(self.month.as_deref(), self.year.as_deref())
    }
}

/// Parses a `{year}/{month}` path strictly.
pub(crate) fn strict_period(year: &str, month: &str) -> ApiResult<Period> {
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidInput(format!("Invalid month '{}'", month)))
        .map_err(rentledger_core::Error::from)?;
    Ok(Period::new(month, parse_year(year)?)?)
}

pub(crate) fn parse_year(year: &str) -> ApiResult<i32> {
    let parsed: i32 = year
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidInput(format!("Invalid year '{}'", year)))
        .map_err(rentledger_core::Error::from)?;
    Ok(parsed)
}

#[utoipa::path(get, path = "/api/v2/rents", responses((status = 200, description = "Rent list for a period, defaulting to the current month")))]
pub async fn list_rents(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<RentList>> {
    let list = state
        .rent_service
        .rent_list(&ctx.realm.id, query.period())
        .await?;
    Ok(Json(list))
}

#[utoipa::path(get, path = "/api/v2/rents/{year}/{month}", responses((status = 200, description = "Rent list for an explicit period"), (status = 400, description = "Invalid period")))]
pub async fn list_rents_for_period(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
    Path((year, month)): Path<(String, String)>,
) -> ApiResult<Json<RentList>> {
    let period = strict_period(&year, &month)?;
    let list = state.rent_service.rent_list(&ctx.realm.id, period).await?;
    Ok(Json(list))
}

#[utoipa::path(get, path = "/api/v2/rents/overview", responses((status = 200, description = "Rent summary for a period")))]
pub async fn get_rents_overview(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<RentSummary>> {
    let summary = state
        .rent_service
        .summarize(&ctx.realm.id, query.period())
        .await?;
    Ok(Json(summary))
}

#[utoipa::path(get, path = "/api/v2/rents/tenant/{id}", responses((status = 200, description = "Rent history of a tenant"), (status = 404, description = "Unknown realm or tenant")))]
pub async fn get_tenant_rent_history(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
    Path(tenant_id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<TenantRentHistory>> {
    let history = state
        .rent_service
        .tenant_rent_history(&ctx.realm.id, &tenant_id, query.period())
        .await?;
    Ok(Json(history))
}

/// The entry with its carry-forward warnings, or `null` when the tenant has
/// neither a record nor an active lease in the period.
#[utoipa::path(get, path = "/api/v2/rents/tenant/{id}/{year}/{month}", responses((status = 200, description = "Rent of a tenant for one period"), (status = 400, description = "Invalid period"), (status = 404, description = "Unknown realm or tenant")))]
pub async fn get_tenant_rent(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RealmContext>,
    Path((tenant_id, year, month)): Path<(String, String, String)>,
) -> ApiResult<Json<Option<TenantRent>>> {
    let period = strict_period(&year, &month)?;
    let rent = state
        .rent_service
        .tenant_rent(&ctx.realm.id, &tenant_id, period)
        .await?;
    Ok(Json(rent))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rents", get(list_rents))
        .route("/rents/overview", get(get_rents_overview))
        .route("/rents/{year}/{month}", get(list_rents_for_period))
        .route("/rents/tenant/{id}", get(get_tenant_rent_history))
        .route("/rents/tenant/{id}/{year}/{month}", get(get_tenant_rent))
}

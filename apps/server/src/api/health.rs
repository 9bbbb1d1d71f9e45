#[utoipa::path(get, path = "/api/v2/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

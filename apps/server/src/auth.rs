//! Bearer-token authentication and realm selection middleware.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use rentledger_core::realms::Realm;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::main_lib::AppState;

/// Request header naming the realm a call is scoped to.
pub const REALM_HEADER: &str = "organizationid";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountClaims {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub account: AccountClaims,
    pub exp: usize,
}

/// The caller behind a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub email: String,
}

/// The realm selected for the current request.
#[derive(Debug, Clone)]
pub struct RealmContext {
    pub account: AuthenticatedAccount,
    pub realm: Realm,
}

pub struct AuthManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthManager {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedAccount, ApiError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("Rejected expired token"),
                other => tracing::debug!("Rejected token: {:?}", other),
            }
            unauthorized()
        })?;

        let email = data.claims.account.email.trim();
        if email.is_empty() {
            return Err(unauthorized());
        }
        Ok(AuthenticatedAccount {
            email: email.to_string(),
        })
    }
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Unauthorized".to_string())
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects requests without a valid bearer token.
pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or_else(unauthorized)?;
    let account = state.auth.validate_token(token)?;
    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

/// Resolves the `organizationid` header to a realm the caller belongs to.
///
/// Runs after [`require_jwt`]. A missing header, an unknown realm and a realm
/// the caller is not a member of all answer 404.
pub async fn require_realm(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let account = request
        .extensions()
        .get::<AuthenticatedAccount>()
        .cloned()
        .ok_or_else(unauthorized)?;

    let realm_id = request
        .headers()
        .get(REALM_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::NotFound("Organization not found".to_string()))?
        .to_string();

    let realm = state
        .realm_service
        .get_member_realm(&account.email, &realm_id)
        .await?;

    request
        .extensions_mut()
        .insert(RealmContext { account, realm });
    Ok(next.run(request).await)
}

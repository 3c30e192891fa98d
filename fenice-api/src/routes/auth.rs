/// Authentication endpoints
///
/// Families log in with their name only. A successful login returns the
/// family record together with an access token (24h) and a refresh token
/// (30d); the client keeps the response and restores the session later
/// through `GET /v1/auth/me`. Logout is client-side.
///
/// # Endpoints
///
/// - `POST /v1/auth/login` - Resolve a family name and issue tokens
/// - `POST /v1/auth/refresh` - Exchange a refresh token for an access token
/// - `GET /v1/auth/me` - Current family of the bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use fenice_shared::{
    auth::{jwt, middleware::FamilyContext},
    error::DomainError,
    identity,
    models::family::Family,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Family name as typed, any case
    #[validate(length(min = 1, max = 100, message = "Family name must be 1-100 characters"))]
    pub username: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The resolved family
    pub family: Family,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,

    /// Always "Bearer"
    pub token_type: &'static str,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Login endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// { "username": "Rossi" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No family with that name
/// - `422 Unprocessable Entity`: Blank name
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let family = identity::resolve(&state.db, &req.username)
        .await
        .map_err(|e| match e {
            DomainError::NotFound(_) => ApiError::Unauthorized("Family name not found".to_string()),
            other => other.into(),
        })?;

    let access_claims = jwt::Claims::for_family(&family, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::for_family(&family, jwt::TokenType::Refresh);

    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        family,
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: jwt::TokenType::Access.default_expiration().num_seconds(),
    }))
}

/// Token refresh endpoint
///
/// The new access token is built from the stored family row, so a changed
/// admin flag takes effect at the next refresh.
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid, expired, or non-refresh token, or the
///   family no longer exists
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let refresh_claims = jwt::validate_refresh_token(&req.refresh_token, state.jwt_secret())?;

    let family = Family::find_by_id(&state.db, refresh_claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Family no longer exists".to_string()))?;

    let access_claims = jwt::Claims::for_family(&family, jwt::TokenType::Access);
    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Session restore endpoint
///
/// # Errors
///
/// - `401 Unauthorized`: The token's family no longer exists
pub async fn me(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
) -> ApiResult<Json<Family>> {
    let family = Family::find_by_id(&state.db, ctx.family_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Family no longer exists".to_string()))?;

    Ok(Json(family))
}

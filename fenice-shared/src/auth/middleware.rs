/// Request authentication for Axum
///
/// Extracts the bearer token from the `Authorization` header, validates it
/// as an access token, and produces the [`FamilyContext`] that every core
/// operation takes as its explicit authorization argument.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use fenice_shared::auth::middleware::FamilyContext;
///
/// async fn handler(Extension(ctx): Extension<FamilyContext>) -> String {
///     format!("Hello, {}!", ctx.username)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_access_token, Claims, JwtError};
use crate::models::family::Family;

/// The acting family for one request
///
/// Passed by value into every core operation; there is no global
/// "current family".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyContext {
    /// Acting family ID
    pub family_id: Uuid,

    /// Acting family login handle (row-level policy context value)
    pub username: String,

    /// Admin capability flag
    pub is_admin: bool,
}

impl FamilyContext {
    /// Creates a context from its parts
    pub fn new(family_id: Uuid, username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            family_id,
            username: username.into(),
            is_admin,
        }
    }

    /// Creates a context from validated token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.sub, claims.username.clone(), claims.is_admin)
    }

    /// Creates a context for a resolved family
    pub fn from_family(family: &Family) -> Self {
        Self::new(family.id, family.username.clone(), family.is_admin)
    }
}

/// Error type for request authentication
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header is not `Bearer <token>`
    #[error("{0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("{0}")]
    InvalidToken(String),
}

/// Authenticates a request from its headers
///
/// # Errors
///
/// - `MissingCredentials` if there is no `Authorization` header
/// - `InvalidFormat` if it is not a bearer token
/// - `InvalidToken` if the token fails validation or is not an access token
pub fn authenticate_bearer(headers: &HeaderMap, secret: &str) -> Result<FamilyContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_access_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    Ok(FamilyContext::from_claims(&claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, TokenType};
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_context_from_claims() {
        let family_id = Uuid::new_v4();
        let claims = Claims::new(family_id, "bianchi", true, TokenType::Access);

        let ctx = FamilyContext::from_claims(&claims);
        assert_eq!(ctx, FamilyContext::new(family_id, "bianchi", true));
    }

    #[test]
    fn test_authenticate_valid_bearer() {
        let family_id = Uuid::new_v4();
        let token = create_token(
            &Claims::new(family_id, "verdi", false, TokenType::Access),
            SECRET,
        )
        .unwrap();

        let ctx = authenticate_bearer(&headers_with(&format!("Bearer {}", token)), SECRET).unwrap();
        assert_eq!(ctx.family_id, family_id);
        assert_eq!(ctx.username, "verdi");
        assert!(!ctx.is_admin);
    }

    #[test]
    fn test_authenticate_rejects_missing_and_malformed() {
        assert_eq!(
            authenticate_bearer(&HeaderMap::new(), SECRET),
            Err(AuthError::MissingCredentials)
        );
        assert!(matches!(
            authenticate_bearer(&headers_with("Token abc"), SECRET),
            Err(AuthError::InvalidFormat(_))
        ));
        assert!(matches!(
            authenticate_bearer(&headers_with("Bearer not-a-jwt"), SECRET),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_authenticate_rejects_refresh_token() {
        let token = create_token(
            &Claims::new(Uuid::new_v4(), "verdi", false, TokenType::Refresh),
            SECRET,
        )
        .unwrap();

        assert!(matches!(
            authenticate_bearer(&headers_with(&format!("Bearer {}", token)), SECRET),
            Err(AuthError::InvalidToken(_))
        ));
    }
}

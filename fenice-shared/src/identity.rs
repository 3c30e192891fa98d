/// Family name resolution
///
/// Maps the name a parent types into the login form onto a seeded family.
/// The families table is not access-controlled, so lookups run directly on
/// the pool without an authorization context.

use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::{DomainError, DomainResult};
use crate::models::family::Family;

/// Trims and lower-cases a login handle
///
/// Returns `None` for blank input.
pub fn normalize_username(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Resolves a human-entered family name to its record
///
/// # Errors
///
/// - `Validation` if the name is blank
/// - `NotFound` if no family has that handle
/// - `Store` on database failure
pub async fn resolve(pool: &PgPool, username: &str) -> DomainResult<Family> {
    let username = normalize_username(username)
        .ok_or_else(|| DomainError::validation("username", "must not be blank"))?;

    let family = Family::find_by_username(pool, &username)
        .await?
        .ok_or_else(|| {
            debug!(username = %username, "Unknown family at login");
            DomainError::NotFound(format!("family '{}'", username))
        })?;

    info!(family_id = %family.id, username = %family.username, "Family resolved");

    Ok(family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("Rossi"), Some("rossi".to_string()));
        assert_eq!(normalize_username("  BIANCHI \n"), Some("bianchi".to_string()));
        assert_eq!(normalize_username(""), None);
        assert_eq!(normalize_username("   "), None);
    }
}

/// Capability checks for family-scoped operations
///
/// The permission model has two levels: any authenticated family, and
/// admin families. Admin-only operations are creating and deleting tasks
/// and deleting time contributions.

use super::middleware::FamilyContext;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// The acting family is not an admin
    #[error("Only administrators can {0}")]
    AdminRequired(String),
}

/// Ensures the acting family has the admin capability
///
/// `action` completes the sentence "Only administrators can ..." and ends
/// up in the user-facing message.
///
/// # Example
///
/// ```
/// use fenice_shared::auth::authorization::require_admin;
/// use fenice_shared::auth::middleware::FamilyContext;
/// use uuid::Uuid;
///
/// let ctx = FamilyContext::new(Uuid::new_v4(), "rossi", false);
/// assert!(require_admin(&ctx, "delete tasks").is_err());
/// ```
pub fn require_admin(ctx: &FamilyContext, action: &str) -> Result<(), AuthzError> {
    if !ctx.is_admin {
        tracing::debug!(family = %ctx.username, action, "Admin capability required");
        return Err(AuthzError::AdminRequired(action.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_require_admin() {
        let admin = FamilyContext::new(Uuid::new_v4(), "rossi", true);
        let member = FamilyContext::new(Uuid::new_v4(), "bianchi", false);

        assert!(require_admin(&admin, "create tasks").is_ok());
        assert_eq!(
            require_admin(&member, "create tasks"),
            Err(AuthzError::AdminRequired("create tasks".to_string()))
        );
    }

    #[test]
    fn test_authz_error_display() {
        let err = AuthzError::AdminRequired("delete contributions".to_string());
        assert_eq!(err.to_string(), "Only administrators can delete contributions");
    }
}

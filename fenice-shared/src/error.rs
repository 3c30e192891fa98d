/// Domain error type
///
/// Every core operation (identity, resources, ledger, contributions) returns
/// `Result<T, DomainError>`. The API layer maps each variant to an HTTP
/// status; nothing here is fatal to the process.

/// Result alias for core operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised by core operations
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Unknown family at login, or unknown resource/contribution id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-admin attempting an admin-only operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Missing required field or out-of-range value
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The family already holds an assignment to this resource
    #[error("Family is already assigned to this resource")]
    AlreadyAssigned,

    /// The resource has reached its maximum number of assignees
    #[error("Resource has no free places left")]
    Full,

    /// Propagating the authorization context to the store failed
    #[error("Failed to apply authorization context: {0}")]
    ConfigurationFailure(#[source] sqlx::Error),

    /// Generic store failure, including connectivity
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl DomainError {
    /// Builds a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Converts authorization check failures into domain errors
impl From<crate::auth::authorization::AuthzError> for DomainError {
    fn from(err: crate::auth::authorization::AuthzError) -> Self {
        DomainError::PermissionDenied(err.to_string())
    }
}

//! Error types for role and registry configuration
//!
//! Every error here is a setup-time failure. Access decisions never return
//! errors: anything inconclusive at request time is a denial.

use thiserror::Error;

/// RBAC configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    /// Role name is empty
    #[error("empty role name")]
    InvalidName,

    /// A grant was configured without a resource
    #[error("resource is nil")]
    NilResource,

    /// The same resource was granted twice while building a role
    #[error("resource {0} is already defined")]
    DuplicateResource(String),

    /// Two seed roles share a name
    #[error("role {0} is redeclared")]
    DuplicateRole(String),

    /// A role with this name is already in the registry
    #[error("role {0} is already defined")]
    RoleAlreadyDefined(String),

    /// Role definitions could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for RBAC configuration operations.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Get error code for API responses and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::InvalidName => "INVALID_NAME",
            RbacError::NilResource => "NIL_RESOURCE",
            RbacError::DuplicateResource(_) => "DUPLICATE_RESOURCE",
            RbacError::DuplicateRole(_) => "DUPLICATE_ROLE",
            RbacError::RoleAlreadyDefined(_) => "ROLE_ALREADY_DEFINED",
            RbacError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// Check if this error was caused by a name collision.
    ///
    /// Callers seeding a registry from several sources commonly skip these
    /// and abort on everything else.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RbacError::DuplicateResource(_)
                | RbacError::DuplicateRole(_)
                | RbacError::RoleAlreadyDefined(_)
        )
    }
}

impl From<serde_json::Error> for RbacError {
    fn from(err: serde_json::Error) -> Self {
        RbacError::InvalidConfig(err.to_string())
    }
}

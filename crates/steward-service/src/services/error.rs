//! Service layer error types
//!
//! Event-driven callers log these and move on; command-driven callers
//! surface `user_message()` to the person who invoked the command.

use std::fmt;

use steward_core::error::DomainError;
use steward_core::traits::PlatformError;
use steward_core::value_objects::Snowflake;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule or boundary violation
    Domain(DomainError),

    /// A self-service request named a role outside the configured set
    NotSelfAssignable { role_id: Snowflake },

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::NotSelfAssignable { role_id } => {
                write!(f, "Role {role_id} is not self-assignable")
            }
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code for structured reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::NotSelfAssignable { .. } => "NOT_SELF_ASSIGNABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// A clear, specific message naming the failed precondition, suitable
    /// for replying to an interactive command
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(DomainError::PermissionDenied { action }) => {
                format!("I don't have the necessary permissions to {action}.")
            }
            Self::Domain(DomainError::RoleHierarchyViolation { role_id }) => format!(
                "I can't manage role {role_id} because it is higher than or equal to my highest role."
            ),
            Self::Domain(DomainError::ConfigurationMissing(what)) => {
                format!("The `{what}` configuration is missing. Please add it and try again.")
            }
            Self::Domain(DomainError::MalformedInput(detail)) => {
                format!("That input could not be processed: {detail}")
            }
            Self::Domain(DomainError::Persistence(_)) => {
                "The activity store is currently unavailable. The operation was not applied."
                    .to_string()
            }
            Self::Domain(DomainError::PlatformUnavailable(_)) => {
                "The chat platform did not respond. Please try again shortly.".to_string()
            }
            Self::NotSelfAssignable { role_id } => {
                format!("Role {role_id} is not in the self-assignable role list.")
            }
            Self::Internal(_) => "An unexpected error occurred.".to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<PlatformError> for ServiceError {
    fn from(err: PlatformError) -> Self {
        Self::Domain(err.into())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

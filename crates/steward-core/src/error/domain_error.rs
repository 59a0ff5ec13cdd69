//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Storage
    // =========================================================================
    /// Unrecoverable storage I/O failure; the triggering operation is
    /// abandoned (the source does not guarantee re-delivery).
    #[error("Persistence failure: {0}")]
    Persistence(String),

    // =========================================================================
    // Platform boundary
    // =========================================================================
    #[error("Permission denied: {action}")]
    PermissionDenied { action: String },

    #[error("Role {role_id} is above the manageable hierarchy ceiling")]
    RoleHierarchyViolation { role_id: Snowflake },

    #[error("Platform unavailable: {0}")]
    PlatformUnavailable(String),

    // =========================================================================
    // Configuration & input
    // =========================================================================
    #[error("Missing required configuration: {0}")]
    ConfigurationMissing(&'static str),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl DomainError {
    /// Get an error code string for structured reporting
    pub fn code(&self) -> &'static str {
        match self {
            Self::Persistence(_) => "PERSISTENCE_FAILURE",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::RoleHierarchyViolation { .. } => "ROLE_HIERARCHY_VIOLATION",
            Self::PlatformUnavailable(_) => "PLATFORM_UNAVAILABLE",
            Self::ConfigurationMissing(_) => "CONFIGURATION_MISSING",
            Self::MalformedInput(_) => "MALFORMED_INPUT",
        }
    }

    /// Check if this is a storage failure
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if the platform refused a mutation (permissions or hierarchy)
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. } | Self::RoleHierarchyViolation { .. }
        )
    }
}

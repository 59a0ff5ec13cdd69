//! Platform and audit ports - the boundary to the chat platform
//!
//! The gateway adapter implements these against the real platform API.
//! Nothing behind this boundary is transactional: two mutations in a row
//! can succeed and fail independently, and callers must not assume
//! rollback.

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::AuditRecord;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Errors the platform boundary can report
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The acting principal lacks rights for the mutation
    #[error("permission denied: {action}")]
    PermissionDenied { action: String },

    /// The role is not manageable by the bot (at or above its ceiling)
    #[error("role {role_id} violates the role hierarchy")]
    HierarchyViolation { role_id: Snowflake },

    /// Transport or platform-side failure
    #[error("platform unavailable: {0}")]
    Unavailable(String),
}

impl From<PlatformError> for DomainError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::PermissionDenied { action } => DomainError::PermissionDenied { action },
            PlatformError::HierarchyViolation { role_id } => {
                DomainError::RoleHierarchyViolation { role_id }
            }
            PlatformError::Unavailable(msg) => DomainError::PlatformUnavailable(msg),
        }
    }
}

/// A role as the platform currently sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRole {
    pub id: Snowflake,
    pub name: String,
    /// Hierarchy position; higher positions outrank lower ones
    pub position: i32,
    /// Managed roles (integrations, boosts) cannot be granted by bots
    pub managed: bool,
}

/// The most recent role-change actor found in the platform audit trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChangeActor {
    pub actor_id: Snowflake,
    /// True when the actor is steward's own platform identity
    pub is_self: bool,
    pub reason: Option<String>,
}

// ============================================================================
// Role Platform
// ============================================================================

#[async_trait]
pub trait RolePlatform: Send + Sync {
    /// The role ids the user currently holds on the platform
    async fn member_roles(&self, user_id: Snowflake) -> PlatformResult<Vec<Snowflake>>;

    /// Add one role to a member
    async fn add_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        reason: &str,
    ) -> PlatformResult<()>;

    /// Remove one role from a member
    async fn remove_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        reason: &str,
    ) -> PlatformResult<()>;

    /// Add several roles in one batched call (toggle-free primitive,
    /// used for restoration rather than promotion)
    async fn apply_roles(
        &self,
        user_id: Snowflake,
        role_ids: &[Snowflake],
        reason: &str,
    ) -> PlatformResult<()>;

    /// Look up a role; `None` when it no longer exists
    async fn find_role(&self, role_id: Snowflake) -> PlatformResult<Option<PlatformRole>>;

    /// Hierarchy position of the bot's own highest role; only roles below
    /// this are manageable
    async fn bot_top_position(&self) -> PlatformResult<i32>;

    /// Best-effort audit-trail lookup for the latest role change to a
    /// member; `None` when the trail has no matching entry yet
    async fn recent_role_actor(&self, user_id: Snowflake)
        -> PlatformResult<Option<RoleChangeActor>>;
}

// ============================================================================
// Audit Sink
// ============================================================================

#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Deliver one consolidated audit record
    async fn record(&self, record: &AuditRecord) -> PlatformResult<()>;
}

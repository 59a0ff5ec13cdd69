//! Repository traits (ports) - define the interface for the durable store
//!
//! The domain layer defines what it needs from storage; the infrastructure
//! layer provides the implementation. Activity events and role history are
//! append-only; the role snapshot is a last-write-wins materialized view.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ActivityEvent, ActivityKind, RoleHistoryEntry, RoleSnapshot};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Activity Event Store
// ============================================================================

#[async_trait]
pub trait ActivityEventRepository: Send + Sync {
    /// Append one event as a single atomic write
    ///
    /// Fails only with `DomainError::Persistence`; business validation is
    /// the caller's job.
    async fn append(&self, event: &ActivityEvent) -> RepoResult<()>;

    /// All events of one kind for one user, ascending by recorded
    /// timestamp, optionally bounded below
    ///
    /// The result is finite and the query is restartable: callers may
    /// re-issue it at any time and replay from scratch.
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        kind: ActivityKind,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<ActivityEvent>>;
}

// ============================================================================
// Role State Store
// ============================================================================

#[async_trait]
pub trait RoleStateRepository: Send + Sync {
    /// The current snapshot for a user, if one has ever been recorded
    async fn snapshot(&self, user_id: Snowflake) -> RepoResult<Option<RoleSnapshot>>;

    /// Overwrite the snapshot wholesale (upsert)
    async fn set_snapshot(&self, user_id: Snowflake, role_ids: &[Snowflake]) -> RepoResult<()>;

    /// Append one history entry (immutable, one per role delta)
    async fn append_history(&self, entry: &RoleHistoryEntry) -> RepoResult<()>;

    /// Full role-change history for a user, ascending by timestamp
    async fn history_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<RoleHistoryEntry>>;
}

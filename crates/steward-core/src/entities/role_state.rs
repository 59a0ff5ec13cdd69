//! Role state entities - the materialized snapshot and the append-only history

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::value_objects::{Provenance, Snowflake};

/// Current role membership for one user (materialized view, not a log)
///
/// Overwritten wholesale on every observed change. Set semantics; the
/// storage order of `role_ids` is not meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSnapshot {
    pub user_id: Snowflake,
    pub role_ids: Vec<Snowflake>,
    pub updated_at: DateTime<Utc>,
}

impl RoleSnapshot {
    /// Create a snapshot from the currently observed role set
    pub fn new(user_id: Snowflake, role_ids: Vec<Snowflake>) -> Self {
        Self {
            user_id,
            role_ids,
            updated_at: Utc::now(),
        }
    }

    /// Check whether the snapshot contains a role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }

    /// True when the user holds no roles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.role_ids.is_empty()
    }

    /// The role ids as a set, for diffing
    pub fn role_set(&self) -> HashSet<Snowflake> {
        self.role_ids.iter().copied().collect()
    }
}

/// Direction of a single role delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    Added,
    Removed,
}

impl RoleAction {
    /// Stable storage encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }

    /// Parse the storage encoding
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "added" => Some(Self::Added),
            "removed" => Some(Self::Removed),
            _ => None,
        }
    }
}

/// One immutable history row per individual role delta
///
/// A logical operation that changes several roles produces several entries,
/// all carrying the same provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHistoryEntry {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub role_id: Snowflake,
    pub action: RoleAction,
    pub source: Provenance,
    pub recorded_at: DateTime<Utc>,
}

impl RoleHistoryEntry {
    /// Create an entry stamped with the current wall clock
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
        action: RoleAction,
        source: Provenance,
    ) -> Self {
        Self {
            id,
            user_id,
            role_id,
            action,
            source,
            recorded_at: Utc::now(),
        }
    }
}

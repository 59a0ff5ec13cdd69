//! Role state database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the role_snapshots table
#[derive(Debug, Clone, FromRow)]
pub struct RoleSnapshotModel {
    pub user_id: i64,
    pub role_ids: Vec<i64>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the role_history table
#[derive(Debug, Clone, FromRow)]
pub struct RoleHistoryModel {
    pub id: i64,
    pub user_id: i64,
    pub role_id: i64,
    /// 'added' or 'removed'
    pub action: String,
    /// Stable provenance encoding, e.g. 'system:regulars'
    pub source: String,
    pub recorded_at: DateTime<Utc>,
}

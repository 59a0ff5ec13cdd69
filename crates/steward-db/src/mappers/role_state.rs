//! Role state model <-> entity mappers

use steward_core::entities::{RoleAction, RoleHistoryEntry, RoleSnapshot};
use steward_core::traits::RepoResult;
use steward_core::value_objects::{Provenance, Snowflake};

use crate::models::{RoleHistoryModel, RoleSnapshotModel};
use crate::repositories::error::corrupt_row;

impl From<RoleSnapshotModel> for RoleSnapshot {
    fn from(model: RoleSnapshotModel) -> Self {
        RoleSnapshot {
            user_id: Snowflake::new(model.user_id),
            role_ids: model.role_ids.into_iter().map(Snowflake::new).collect(),
            updated_at: model.updated_at,
        }
    }
}

/// Convert a history row, validating the action encoding
///
/// Provenance parsing is infallible by design: rows written before a
/// variant existed load as `Unknown`.
pub fn role_history_entry(model: RoleHistoryModel) -> RepoResult<RoleHistoryEntry> {
    let action = RoleAction::parse(&model.action)
        .ok_or_else(|| corrupt_row("role_history", "action", &model.action))?;

    Ok(RoleHistoryEntry {
        id: Snowflake::new(model.id),
        user_id: Snowflake::new(model.user_id),
        role_id: Snowflake::new(model.role_id),
        action,
        source: Provenance::parse(&model.source),
        recorded_at: model.recorded_at,
    })
}

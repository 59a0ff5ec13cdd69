//! PostgreSQL implementation of RoleStateRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use steward_core::entities::{RoleHistoryEntry, RoleSnapshot};
use steward_core::traits::{RepoResult, RoleStateRepository};
use steward_core::value_objects::Snowflake;

use crate::mappers::role_history_entry;
use crate::models::{RoleHistoryModel, RoleSnapshotModel};

use super::error::map_db_error;

/// PostgreSQL implementation of RoleStateRepository
#[derive(Clone)]
pub struct PgRoleStateRepository {
    pool: PgPool,
}

impl PgRoleStateRepository {
    /// Create a new PgRoleStateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStateRepository for PgRoleStateRepository {
    #[instrument(skip(self))]
    async fn snapshot(&self, user_id: Snowflake) -> RepoResult<Option<RoleSnapshot>> {
        let result = sqlx::query_as::<_, RoleSnapshotModel>(
            r#"
            SELECT user_id, role_ids, updated_at
            FROM role_snapshots
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RoleSnapshot::from))
    }

    #[instrument(skip(self, role_ids), fields(role_count = role_ids.len()))]
    async fn set_snapshot(&self, user_id: Snowflake, role_ids: &[Snowflake]) -> RepoResult<()> {
        let ids: Vec<i64> = role_ids.iter().map(|id| id.into_inner()).collect();

        // Last write wins, wholesale
        sqlx::query(
            r#"
            INSERT INTO role_snapshots (user_id, role_ids, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET role_ids = EXCLUDED.role_ids, updated_at = NOW()
            "#,
        )
        .bind(user_id.into_inner())
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, entry), fields(user_id = %entry.user_id, role_id = %entry.role_id))]
    async fn append_history(&self, entry: &RoleHistoryEntry) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO role_history (id, user_id, role_id, action, source, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id.into_inner())
        .bind(entry.user_id.into_inner())
        .bind(entry.role_id.into_inner())
        .bind(entry.action.as_str())
        .bind(entry.source.to_string())
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn history_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<RoleHistoryEntry>> {
        let rows = sqlx::query_as::<_, RoleHistoryModel>(
            r#"
            SELECT id, user_id, role_id, action, source, recorded_at
            FROM role_history
            WHERE user_id = $1
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(role_history_entry).collect()
    }
}

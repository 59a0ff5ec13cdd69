//! PostgreSQL implementation of ActivityEventRepository
//!
//! Each event kind has its own append-only table. Every append is a
//! single INSERT, so the atomicity contract falls straight out of the
//! database; there are no multi-row writes for readers to observe
//! half-done.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use steward_core::entities::{ActivityEvent, ActivityKind, ActivityPayload};
use steward_core::traits::{ActivityEventRepository, RepoResult};
use steward_core::value_objects::Snowflake;

use crate::mappers::{reaction_event, voice_session_event, voice_state_event};
use crate::models::{
    MessageDeleteEventModel, MessageEditEventModel, MessageEventModel, ReactionEventModel,
    VoiceSessionEventModel, VoiceStateEventModel,
};

use super::error::map_db_error;

/// PostgreSQL implementation of ActivityEventRepository
#[derive(Clone)]
pub struct PgActivityEventRepository {
    pool: PgPool,
}

impl PgActivityEventRepository {
    /// Create a new PgActivityEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityEventRepository for PgActivityEventRepository {
    #[instrument(skip(self, event), fields(user_id = %event.user_id, kind = ?event.kind()))]
    async fn append(&self, event: &ActivityEvent) -> RepoResult<()> {
        match &event.payload {
            ActivityPayload::MessageSent { message_id } => {
                sqlx::query(
                    r#"
                    INSERT INTO message_events (id, user_id, channel_id, message_id, recorded_at)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(event.id.into_inner())
                .bind(event.user_id.into_inner())
                .bind(event.channel_id.into_inner())
                .bind(message_id.into_inner())
                .bind(event.recorded_at)
                .execute(&self.pool)
                .await
            }
            ActivityPayload::MessageEdited {
                message_id,
                old_content,
            } => {
                sqlx::query(
                    r#"
                    INSERT INTO message_edit_events (id, user_id, channel_id, message_id, old_content, recorded_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(event.id.into_inner())
                .bind(event.user_id.into_inner())
                .bind(event.channel_id.into_inner())
                .bind(message_id.into_inner())
                .bind(old_content.as_deref())
                .bind(event.recorded_at)
                .execute(&self.pool)
                .await
            }
            ActivityPayload::MessageDeleted { message_id } => {
                sqlx::query(
                    r#"
                    INSERT INTO message_delete_events (id, user_id, channel_id, message_id, recorded_at)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(event.id.into_inner())
                .bind(event.user_id.into_inner())
                .bind(event.channel_id.into_inner())
                .bind(message_id.into_inner())
                .bind(event.recorded_at)
                .execute(&self.pool)
                .await
            }
            ActivityPayload::VoiceSession { transition } => {
                sqlx::query(
                    r#"
                    INSERT INTO voice_session_events (id, user_id, channel_id, transition, recorded_at)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(event.id.into_inner())
                .bind(event.user_id.into_inner())
                .bind(event.channel_id.into_inner())
                .bind(transition.as_str())
                .bind(event.recorded_at)
                .execute(&self.pool)
                .await
            }
            ActivityPayload::VoiceState { change } => {
                sqlx::query(
                    r#"
                    INSERT INTO voice_state_events (id, user_id, channel_id, change, recorded_at)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(event.id.into_inner())
                .bind(event.user_id.into_inner())
                .bind(event.channel_id.into_inner())
                .bind(change.as_str())
                .bind(event.recorded_at)
                .execute(&self.pool)
                .await
            }
            ActivityPayload::Reaction {
                message_id,
                emoji,
                action,
            } => {
                sqlx::query(
                    r#"
                    INSERT INTO reaction_events (id, user_id, channel_id, message_id, emoji, action, recorded_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(event.id.into_inner())
                .bind(event.user_id.into_inner())
                .bind(event.channel_id.into_inner())
                .bind(message_id.into_inner())
                .bind(emoji)
                .bind(action.as_str())
                .bind(event.recorded_at)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        kind: ActivityKind,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<ActivityEvent>> {
        let user_id = user_id.into_inner();

        match kind {
            ActivityKind::MessageSent => {
                let rows = sqlx::query_as::<_, MessageEventModel>(
                    r#"
                    SELECT id, user_id, channel_id, message_id, recorded_at
                    FROM message_events
                    WHERE user_id = $1 AND ($2::timestamptz IS NULL OR recorded_at >= $2)
                    ORDER BY recorded_at ASC
                    "#,
                )
                .bind(user_id)
                .bind(since)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

                Ok(rows.into_iter().map(ActivityEvent::from).collect())
            }
            ActivityKind::MessageEdited => {
                let rows = sqlx::query_as::<_, MessageEditEventModel>(
                    r#"
                    SELECT id, user_id, channel_id, message_id, old_content, recorded_at
                    FROM message_edit_events
                    WHERE user_id = $1 AND ($2::timestamptz IS NULL OR recorded_at >= $2)
                    ORDER BY recorded_at ASC
                    "#,
                )
                .bind(user_id)
                .bind(since)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

                Ok(rows.into_iter().map(ActivityEvent::from).collect())
            }
            ActivityKind::MessageDeleted => {
                let rows = sqlx::query_as::<_, MessageDeleteEventModel>(
                    r#"
                    SELECT id, user_id, channel_id, message_id, recorded_at
                    FROM message_delete_events
                    WHERE user_id = $1 AND ($2::timestamptz IS NULL OR recorded_at >= $2)
                    ORDER BY recorded_at ASC
                    "#,
                )
                .bind(user_id)
                .bind(since)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

                Ok(rows.into_iter().map(ActivityEvent::from).collect())
            }
            ActivityKind::VoiceSession => {
                let rows = sqlx::query_as::<_, VoiceSessionEventModel>(
                    r#"
                    SELECT id, user_id, channel_id, transition, recorded_at
                    FROM voice_session_events
                    WHERE user_id = $1 AND ($2::timestamptz IS NULL OR recorded_at >= $2)
                    ORDER BY recorded_at ASC
                    "#,
                )
                .bind(user_id)
                .bind(since)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

                rows.into_iter().map(voice_session_event).collect()
            }
            ActivityKind::VoiceState => {
                let rows = sqlx::query_as::<_, VoiceStateEventModel>(
                    r#"
                    SELECT id, user_id, channel_id, change, recorded_at
                    FROM voice_state_events
                    WHERE user_id = $1 AND ($2::timestamptz IS NULL OR recorded_at >= $2)
                    ORDER BY recorded_at ASC
                    "#,
                )
                .bind(user_id)
                .bind(since)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

                rows.into_iter().map(voice_state_event).collect()
            }
            ActivityKind::Reaction => {
                let rows = sqlx::query_as::<_, ReactionEventModel>(
                    r#"
                    SELECT id, user_id, channel_id, message_id, emoji, action, recorded_at
                    FROM reaction_events
                    WHERE user_id = $1 AND ($2::timestamptz IS NULL OR recorded_at >= $2)
                    ORDER BY recorded_at ASC
                    "#,
                )
                .bind(user_id)
                .bind(since)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

                rows.into_iter().map(reaction_event).collect()
            }
        }
    }
}

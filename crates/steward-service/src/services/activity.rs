//! Activity aggregator
//!
//! Derives per-user engagement statistics by replaying the event log on
//! demand. Nothing is cached: an earlier revision kept join timestamps in
//! a process-local map and lost open sessions on restart, so all state
//! now lives in the store and is recomputed per request.

use chrono::{DateTime, Utc};
use tracing::instrument;

use steward_core::entities::{
    ActivityEvent, ActivityKind, ActivityPayload, UserStats, VoiceTransition,
};
use steward_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Activity aggregation service
pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    /// Create a new ActivityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compute message count and voice minutes for a user
    ///
    /// Idempotent over an unchanged log: two calls return identical
    /// results.
    #[instrument(skip(self))]
    pub async fn compute_stats(&self, user_id: Snowflake) -> ServiceResult<UserStats> {
        let messages = self
            .ctx
            .events()
            .find_by_user(user_id, ActivityKind::MessageSent, None)
            .await?;

        let sessions = self
            .ctx
            .events()
            .find_by_user(user_id, ActivityKind::VoiceSession, None)
            .await?;

        Ok(UserStats::new(messages.len() as u64, voice_minutes(sessions)))
    }
}

/// Pair join/leave events into whole voice minutes
///
/// Events are sorted by recorded timestamp before pairing; network
/// delivery order is not timestamp order. A single-slot state machine
/// walks the sorted stream: duplicate joins keep the original timer,
/// leaves without a join are dropped, and a session still open at the end
/// of the log contributes nothing until its leave arrives.
pub fn voice_minutes(mut events: Vec<ActivityEvent>) -> u64 {
    events.sort_by_key(|e| e.recorded_at);

    let mut total = 0u64;
    let mut joined_at: Option<DateTime<Utc>> = None;

    for event in &events {
        let ActivityPayload::VoiceSession { transition } = &event.payload else {
            continue;
        };
        match transition {
            VoiceTransition::Join => {
                if joined_at.is_none() {
                    joined_at = Some(event.recorded_at);
                }
            }
            VoiceTransition::Leave => {
                if let Some(start) = joined_at.take() {
                    // Clamp against clock skew; never count negative time
                    let seconds = (event.recorded_at - start).num_seconds().max(0);
                    total += (seconds / 60) as u64;
                }
            }
        }
    }

    total
}

//! Activity event database models, one per append-only table

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the message_events table
#[derive(Debug, Clone, FromRow)]
pub struct MessageEventModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub message_id: i64,
    pub recorded_at: DateTime<Utc>,
}

/// Database model for the message_edit_events table
#[derive(Debug, Clone, FromRow)]
pub struct MessageEditEventModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub message_id: i64,
    pub old_content: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Database model for the message_delete_events table
#[derive(Debug, Clone, FromRow)]
pub struct MessageDeleteEventModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub message_id: i64,
    pub recorded_at: DateTime<Utc>,
}

/// Database model for the voice_session_events table
#[derive(Debug, Clone, FromRow)]
pub struct VoiceSessionEventModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    /// Session boundary: 'join' or 'leave'
    pub transition: String,
    pub recorded_at: DateTime<Utc>,
}

/// Database model for the voice_state_events table
#[derive(Debug, Clone, FromRow)]
pub struct VoiceStateEventModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    /// State flip encoding, e.g. 'mute' or 'stream-start'
    pub change: String,
    pub recorded_at: DateTime<Utc>,
}

/// Database model for the reaction_events table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionEventModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub message_id: i64,
    pub emoji: String,
    /// 'add' or 'remove'
    pub action: String,
    pub recorded_at: DateTime<Utc>,
}

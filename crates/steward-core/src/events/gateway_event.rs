//! Gateway events - typed records delivered by the platform gateway
//!
//! The gateway adapter decodes the platform's wire format into these
//! records; the engine never sees raw transport frames.

use serde::{Deserialize, Serialize};

use crate::entities::ReactionAction;
use crate::value_objects::Snowflake;

/// All events the engine consumes from the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEvent {
    MessageSent(MessageSentEvent),
    MessageEdited(MessageEditedEvent),
    MessageDeleted(MessageDeletedEvent),
    ReactionChanged(ReactionChangedEvent),
    VoiceStateChanged(VoiceStateChangedEvent),
    MemberRolesChanged(MemberRolesChangedEvent),
    MemberJoined(MemberJoinedEvent),
}

impl GatewayEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageSent(_) => "MESSAGE_SENT",
            Self::MessageEdited(_) => "MESSAGE_EDITED",
            Self::MessageDeleted(_) => "MESSAGE_DELETED",
            Self::ReactionChanged(_) => "REACTION_CHANGED",
            Self::VoiceStateChanged(_) => "VOICE_STATE_CHANGED",
            Self::MemberRolesChanged(_) => "MEMBER_ROLES_CHANGED",
            Self::MemberJoined(_) => "MEMBER_JOINED",
        }
    }

    /// The user the event concerns; used to keep same-user processing
    /// ordered across the worker pool
    pub fn user_id(&self) -> Snowflake {
        match self {
            Self::MessageSent(e) => e.user_id,
            Self::MessageEdited(e) => e.user_id,
            Self::MessageDeleted(e) => e.user_id,
            Self::ReactionChanged(e) => e.user_id,
            Self::VoiceStateChanged(e) => e.user_id,
            Self::MemberRolesChanged(e) => e.user_id,
            Self::MemberJoined(e) => e.user_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSentEvent {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub content: String,
    pub author_is_bot: bool,
    pub guild_present: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEditedEvent {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub old_content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeletedEvent {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionChangedEvent {
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub emoji: String,
    pub action: ReactionAction,
}

/// Raw voice-state transition; the dispatcher derives session and state
/// events from the before/after fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceStateChangedEvent {
    pub user_id: Snowflake,
    pub before_channel: Option<Snowflake>,
    pub after_channel: Option<Snowflake>,
    pub before_mute: bool,
    pub after_mute: bool,
    pub before_deaf: bool,
    pub after_deaf: bool,
    pub before_stream: bool,
    pub after_stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRolesChangedEvent {
    pub user_id: Snowflake,
    pub before_roles: Vec<Snowflake>,
    pub after_roles: Vec<Snowflake>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberJoinedEvent {
    pub user_id: Snowflake,
}

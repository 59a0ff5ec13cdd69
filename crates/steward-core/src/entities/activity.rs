//! Activity event entity - one append-only record per observed user action

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A single recorded activity event
///
/// Events are write-once: the store appends them at ingestion time and the
/// aggregator replays them. `recorded_at` is stamped when the event is
/// ingested; delivery order from the platform is not guaranteed to match
/// timestamp order, so consumers sort before pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub recorded_at: DateTime<Utc>,
    pub payload: ActivityPayload,
}

/// Kind-specific payload of an activity event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityPayload {
    MessageSent {
        message_id: Snowflake,
    },
    MessageEdited {
        message_id: Snowflake,
        old_content: Option<String>,
    },
    MessageDeleted {
        message_id: Snowflake,
    },
    VoiceSession {
        transition: VoiceTransition,
    },
    VoiceState {
        change: VoiceStateChange,
    },
    Reaction {
        message_id: Snowflake,
        emoji: String,
        action: ReactionAction,
    },
}

/// Discriminant used when querying one event sub-stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    MessageSent,
    MessageEdited,
    MessageDeleted,
    VoiceSession,
    VoiceState,
    Reaction,
}

/// Voice channel session boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceTransition {
    Join,
    Leave,
}

/// Voice state flips that are not session boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoiceStateChange {
    Mute,
    Unmute,
    Deafen,
    Undeafen,
    StreamStart,
    StreamStop,
}

/// Direction of a reaction change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Add,
    Remove,
}

impl ActivityEvent {
    /// Create an event stamped with the current wall clock
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        channel_id: Snowflake,
        payload: ActivityPayload,
    ) -> Self {
        Self {
            id,
            user_id,
            channel_id,
            recorded_at: Utc::now(),
            payload,
        }
    }

    /// The sub-stream this event belongs to
    pub fn kind(&self) -> ActivityKind {
        match &self.payload {
            ActivityPayload::MessageSent { .. } => ActivityKind::MessageSent,
            ActivityPayload::MessageEdited { .. } => ActivityKind::MessageEdited,
            ActivityPayload::MessageDeleted { .. } => ActivityKind::MessageDeleted,
            ActivityPayload::VoiceSession { .. } => ActivityKind::VoiceSession,
            ActivityPayload::VoiceState { .. } => ActivityKind::VoiceState,
            ActivityPayload::Reaction { .. } => ActivityKind::Reaction,
        }
    }
}

impl VoiceTransition {
    /// Stable storage encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
        }
    }

    /// Parse the storage encoding
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "join" => Some(Self::Join),
            "leave" => Some(Self::Leave),
            _ => None,
        }
    }
}

impl VoiceStateChange {
    /// Stable storage encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mute => "mute",
            Self::Unmute => "unmute",
            Self::Deafen => "deafen",
            Self::Undeafen => "undeafen",
            Self::StreamStart => "stream-start",
            Self::StreamStop => "stream-stop",
        }
    }

    /// Parse the storage encoding
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mute" => Some(Self::Mute),
            "unmute" => Some(Self::Unmute),
            "deafen" => Some(Self::Deafen),
            "undeafen" => Some(Self::Undeafen),
            "stream-start" => Some(Self::StreamStart),
            "stream-stop" => Some(Self::StreamStop),
            _ => None,
        }
    }
}

impl ReactionAction {
    /// Stable storage encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }

    /// Parse the storage encoding
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

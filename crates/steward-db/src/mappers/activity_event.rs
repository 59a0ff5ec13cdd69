//! Activity event model <-> entity mappers
//!
//! Enum-like columns are stored as their stable string encodings; a row
//! that fails to parse is treated as storage corruption, not business
//! input, and surfaces as a persistence error.

use steward_core::entities::{
    ActivityEvent, ActivityPayload, ReactionAction, VoiceStateChange, VoiceTransition,
};
use steward_core::traits::RepoResult;
use steward_core::value_objects::Snowflake;

use crate::models::{
    MessageDeleteEventModel, MessageEditEventModel, MessageEventModel, ReactionEventModel,
    VoiceSessionEventModel, VoiceStateEventModel,
};
use crate::repositories::error::corrupt_row;

impl From<MessageEventModel> for ActivityEvent {
    fn from(model: MessageEventModel) -> Self {
        ActivityEvent {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            channel_id: Snowflake::new(model.channel_id),
            recorded_at: model.recorded_at,
            payload: ActivityPayload::MessageSent {
                message_id: Snowflake::new(model.message_id),
            },
        }
    }
}

impl From<MessageEditEventModel> for ActivityEvent {
    fn from(model: MessageEditEventModel) -> Self {
        ActivityEvent {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            channel_id: Snowflake::new(model.channel_id),
            recorded_at: model.recorded_at,
            payload: ActivityPayload::MessageEdited {
                message_id: Snowflake::new(model.message_id),
                old_content: model.old_content,
            },
        }
    }
}

impl From<MessageDeleteEventModel> for ActivityEvent {
    fn from(model: MessageDeleteEventModel) -> Self {
        ActivityEvent {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            channel_id: Snowflake::new(model.channel_id),
            recorded_at: model.recorded_at,
            payload: ActivityPayload::MessageDeleted {
                message_id: Snowflake::new(model.message_id),
            },
        }
    }
}

/// Convert a voice session row, validating the transition encoding
pub fn voice_session_event(model: VoiceSessionEventModel) -> RepoResult<ActivityEvent> {
    let transition = VoiceTransition::parse(&model.transition)
        .ok_or_else(|| corrupt_row("voice_session_events", "transition", &model.transition))?;

    Ok(ActivityEvent {
        id: Snowflake::new(model.id),
        user_id: Snowflake::new(model.user_id),
        channel_id: Snowflake::new(model.channel_id),
        recorded_at: model.recorded_at,
        payload: ActivityPayload::VoiceSession { transition },
    })
}

/// Convert a voice state row, validating the change encoding
pub fn voice_state_event(model: VoiceStateEventModel) -> RepoResult<ActivityEvent> {
    let change = VoiceStateChange::parse(&model.change)
        .ok_or_else(|| corrupt_row("voice_state_events", "change", &model.change))?;

    Ok(ActivityEvent {
        id: Snowflake::new(model.id),
        user_id: Snowflake::new(model.user_id),
        channel_id: Snowflake::new(model.channel_id),
        recorded_at: model.recorded_at,
        payload: ActivityPayload::VoiceState { change },
    })
}

/// Convert a reaction row, validating the action encoding
pub fn reaction_event(model: ReactionEventModel) -> RepoResult<ActivityEvent> {
    let action = ReactionAction::parse(&model.action)
        .ok_or_else(|| corrupt_row("reaction_events", "action", &model.action))?;

    Ok(ActivityEvent {
        id: Snowflake::new(model.id),
        user_id: Snowflake::new(model.user_id),
        channel_id: Snowflake::new(model.channel_id),
        recorded_at: model.recorded_at,
        payload: ActivityPayload::Reaction {
            message_id: Snowflake::new(model.message_id),
            emoji: model.emoji,
            action,
        },
    })
}

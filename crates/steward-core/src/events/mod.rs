//! Typed gateway events consumed from the platform

mod gateway_event;

pub use gateway_event::{
    GatewayEvent, MemberJoinedEvent, MemberRolesChangedEvent, MessageDeletedEvent,
    MessageEditedEvent, MessageSentEvent, ReactionChangedEvent, VoiceStateChangedEvent,
};

//! Database models - SQLx-compatible structs for PostgreSQL tables

mod activity_event;
mod role_state;

pub use activity_event::{
    MessageDeleteEventModel, MessageEditEventModel, MessageEventModel, ReactionEventModel,
    VoiceSessionEventModel, VoiceStateEventModel,
};
pub use role_state::{RoleHistoryModel, RoleSnapshotModel};

//! Entity <-> model mappers

mod activity_event;
mod role_state;

pub use activity_event::{reaction_event, voice_session_event, voice_state_event};
pub use role_state::role_history_entry;

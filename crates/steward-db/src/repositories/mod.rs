//! Repository implementations

mod activity_event;
pub(crate) mod error;
mod role_state;

pub use activity_event::PgActivityEventRepository;
pub use role_state::PgRoleStateRepository;

//! Derived per-user engagement statistics

use serde::{Deserialize, Serialize};

/// Aggregate activity statistics for one user
///
/// Never persisted: recomputed on demand from the event log, so two calls
/// over an unchanged log always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Count of message-sent events (edits and deletes do not count)
    pub message_count: u64,
    /// Whole minutes of closed voice sessions; open sessions contribute 0
    pub voice_minutes: u64,
}

impl UserStats {
    pub fn new(message_count: u64, voice_minutes: u64) -> Self {
        Self {
            message_count,
            voice_minutes,
        }
    }
}

//! Toggle groups - configured pairs of mutually exclusive roles
//!
//! Earlier revisions stored these as a one-directional map and scanned it
//! both ways on every grant. The registry here is built once at
//! configuration load and answers lookups keyed by either member.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// An unordered pair of mutually exclusive role ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePair {
    pub first: Snowflake,
    pub second: Snowflake,
}

/// Errors raised while building the registry from configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TogglePairError {
    #[error("toggle pair maps role {0} to itself")]
    SelfPair(Snowflake),

    #[error("role {0} appears in more than one toggle pair")]
    OverlappingPairs(Snowflake),
}

/// Symmetric lookup over all configured toggle pairs
#[derive(Debug, Clone, Default)]
pub struct ToggleRegistry {
    conflicts: HashMap<Snowflake, Snowflake>,
}

impl ToggleRegistry {
    /// Build the registry, validating the pair set
    ///
    /// Each role may belong to at most one pair, and a pair may not map a
    /// role to itself.
    pub fn from_pairs(pairs: &[TogglePair]) -> Result<Self, TogglePairError> {
        let mut conflicts = HashMap::with_capacity(pairs.len() * 2);
        for pair in pairs {
            if pair.first == pair.second {
                return Err(TogglePairError::SelfPair(pair.first));
            }
            for (a, b) in [(pair.first, pair.second), (pair.second, pair.first)] {
                if conflicts.insert(a, b).is_some() {
                    return Err(TogglePairError::OverlappingPairs(a));
                }
            }
        }
        Ok(Self { conflicts })
    }

    /// The role that conflicts with `role_id`, if any
    #[inline]
    pub fn conflict_for(&self, role_id: Snowflake) -> Option<Snowflake> {
        self.conflicts.get(&role_id).copied()
    }

    /// Number of configured pairs
    pub fn pair_count(&self) -> usize {
        self.conflicts.len() / 2
    }
}

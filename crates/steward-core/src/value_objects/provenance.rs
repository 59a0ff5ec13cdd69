//! Provenance - tagged attribution for role changes
//!
//! Replaces the free-text "source" strings of earlier revisions with a
//! closed set of variants so downstream filtering does not have to parse
//! prose. The string encoding is stable and round-trips through storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Snowflake;

/// Who (or what) caused a role change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Provenance {
    /// An automatic policy, identified by its configured name
    System { policy: String },
    /// A moderator acting through the command front-end
    Moderator { actor_id: Snowflake },
    /// The affected user, through a self-assignment surface
    SelfService,
    /// Role restoration for a returning member
    Restoration,
    /// Attribution could not be determined
    Unknown,
}

impl Provenance {
    /// Attribution for a named automatic policy
    pub fn system(policy: impl Into<String>) -> Self {
        Self::System {
            policy: policy.into(),
        }
    }

    /// Attribution for a moderator action
    pub fn moderator(actor_id: Snowflake) -> Self {
        Self::Moderator { actor_id }
    }

    /// Parse the stable storage encoding produced by `Display`
    ///
    /// Unrecognized input maps to `Unknown` rather than an error: old rows
    /// written before a variant existed must still load.
    pub fn parse(s: &str) -> Self {
        if let Some(policy) = s.strip_prefix("system:") {
            return Self::system(policy);
        }
        if let Some(id) = s.strip_prefix("moderator:") {
            if let Ok(actor_id) = Snowflake::parse(id) {
                return Self::Moderator { actor_id };
            }
            return Self::Unknown;
        }
        match s {
            "self-service" => Self::SelfService,
            "restore" => Self::Restoration,
            _ => Self::Unknown,
        }
    }

    /// True when the change originated from steward itself
    #[inline]
    pub fn is_automatic(&self) -> bool {
        matches!(self, Self::System { .. } | Self::Restoration)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System { policy } => write!(f, "system:{policy}"),
            Self::Moderator { actor_id } => write!(f, "moderator:{actor_id}"),
            Self::SelfService => write!(f, "self-service"),
            Self::Restoration => write!(f, "restore"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

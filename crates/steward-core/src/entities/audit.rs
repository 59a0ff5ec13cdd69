//! Audit record - one consolidated entry per logical role action

use chrono::{DateTime, Utc};

use crate::value_objects::{Provenance, Snowflake};

/// A structured record handed to the audit sink
///
/// One logical action yields exactly one record, even when it touches two
/// roles (an addition plus a toggle removal). The details text carries the
/// full story so the trail stays readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub title: String,
    pub target_user: Snowflake,
    pub responsible_party: Provenance,
    pub details: String,
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Create a record stamped with the current wall clock
    pub fn new(
        title: impl Into<String>,
        target_user: Snowflake,
        responsible_party: Provenance,
        details: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            target_user,
            responsible_party,
            details: details.into(),
            recorded_at: Utc::now(),
        }
    }
}

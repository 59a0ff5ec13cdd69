//! Tracing-backed audit sink
//!
//! Event-driven paths have no interactive caller, so their consolidated
//! audit records land in the structured log stream. Deployments that post
//! embeds to a log channel supply their own `AuditSink` through the
//! gateway adapter instead.

use async_trait::async_trait;
use tracing::info;

use steward_core::entities::AuditRecord;
use steward_core::traits::{AuditSink, PlatformResult};

/// Audit sink that emits one structured log line per record
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, record: &AuditRecord) -> PlatformResult<()> {
        info!(
            target: "steward::audit",
            title = %record.title,
            target_user = %record.target_user,
            responsible_party = %record.responsible_party,
            details = %record.details,
            recorded_at = %record.recorded_at,
            "Audit record"
        );
        Ok(())
    }
}

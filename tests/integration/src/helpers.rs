//! Test harness wiring the in-memory fixtures into a service context

use std::sync::Arc;

use steward_common::{PolicyConfig, ReconcileConfig};
use steward_core::policy::{PromotionRule, RuleLogic, TogglePair};
use steward_core::value_objects::Snowflake;
use steward_service::ServiceContext;

use crate::fixtures::{FakePlatform, MemoryEventStore, MemoryRoleStateStore, RecordingAuditSink};

/// Everything a scenario test needs: the context plus handles to the
/// fixtures backing it
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub events: Arc<MemoryEventStore>,
    pub role_state: Arc<MemoryRoleStateStore>,
    pub platform: Arc<FakePlatform>,
    pub audit: Arc<RecordingAuditSink>,
}

/// Build a harness with no policies configured
pub fn harness() -> TestHarness {
    harness_with(PolicyConfig::default())
}

/// Build a harness with the given policy configuration
///
/// The reconciler's audit-trail lookup runs a single attempt with no
/// delay so tests stay fast.
pub fn harness_with(policies: PolicyConfig) -> TestHarness {
    let events = Arc::new(MemoryEventStore::new());
    let role_state = Arc::new(MemoryRoleStateStore::new());
    let platform = Arc::new(FakePlatform::new());
    let audit = Arc::new(RecordingAuditSink::new());

    let ctx = ServiceContext::builder()
        .events(events.clone())
        .role_state(role_state.clone())
        .platform(platform.clone())
        .audit(audit.clone())
        .policies(policies)
        .reconcile(ReconcileConfig {
            source_lookup_attempts: 1,
            source_lookup_delay_ms: 0,
        })
        .build()
        .expect("harness context should build");

    TestHarness {
        ctx,
        events,
        role_state,
        platform,
        audit,
    }
}

/// A promotion rule fixture
pub fn rule(
    name: &str,
    source_role: Snowflake,
    target_role: Snowflake,
    min_messages: u64,
    min_voice_minutes: u64,
    logic: RuleLogic,
) -> PromotionRule {
    PromotionRule {
        name: name.to_string(),
        source_role,
        target_role,
        min_messages,
        min_voice_minutes,
        logic,
    }
}

/// A toggle pair fixture
pub fn toggle(first: Snowflake, second: Snowflake) -> TogglePair {
    TogglePair { first, second }
}

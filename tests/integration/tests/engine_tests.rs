//! Accounting and role-mutation scenario tests
//!
//! Drives the aggregator and the mutation coordinator through the
//! in-memory harness. Run with: cargo test -p integration-tests

use integration_tests::{harness, harness_with, message_event, toggle, voice_event};
use steward_common::PolicyConfig;
use steward_core::entities::VoiceTransition;
use steward_core::traits::ActivityEventRepository;
use steward_core::value_objects::{Provenance, Snowflake};
use steward_service::{ActivityService, CommandService, RoleService, SelfRoleOutcome};

// ============================================================================
// Activity Aggregation
// ============================================================================

#[tokio::test]
async fn test_voice_minutes_from_well_formed_pairs() {
    let h = harness();
    let user = Snowflake::new(1);

    // Two sessions: 10 minutes and 2.5 minutes -> floor(750s/60) totals 12
    for event in [
        voice_event(user, 0, VoiceTransition::Join),
        voice_event(user, 600, VoiceTransition::Leave),
        voice_event(user, 900, VoiceTransition::Join),
        voice_event(user, 1050, VoiceTransition::Leave),
    ] {
        h.events.append(&event).await.unwrap();
    }

    let stats = ActivityService::new(&h.ctx).compute_stats(user).await.unwrap();
    assert_eq!(stats.voice_minutes, 12);
    assert_eq!(stats.message_count, 0);
}

#[tokio::test]
async fn test_dangling_join_contributes_zero() {
    let h = harness();
    let user = Snowflake::new(1);

    for event in [
        voice_event(user, 0, VoiceTransition::Join),
        voice_event(user, 300, VoiceTransition::Leave),
        voice_event(user, 400, VoiceTransition::Join),
    ] {
        h.events.append(&event).await.unwrap();
    }

    let stats = ActivityService::new(&h.ctx).compute_stats(user).await.unwrap();
    assert_eq!(stats.voice_minutes, 5, "open session must not count yet");
}

#[tokio::test]
async fn test_compute_stats_is_idempotent() {
    let h = harness();
    let user = Snowflake::new(1);

    for i in 0..3 {
        h.events.append(&message_event(user, i)).await.unwrap();
    }
    for event in [
        voice_event(user, 0, VoiceTransition::Join),
        voice_event(user, 359, VoiceTransition::Leave),
    ] {
        h.events.append(&event).await.unwrap();
    }

    let service = ActivityService::new(&h.ctx);
    let first = service.compute_stats(user).await.unwrap();
    let second = service.compute_stats(user).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.message_count, 3);
    assert_eq!(first.voice_minutes, 5);
}

#[tokio::test]
async fn test_stats_are_scoped_to_the_user() {
    let h = harness();
    let user = Snowflake::new(1);
    let other = Snowflake::new(2);

    h.events.append(&message_event(user, 0)).await.unwrap();
    h.events.append(&message_event(other, 1)).await.unwrap();

    let stats = CommandService::new(&h.ctx).get_user_stats(user).await.unwrap();
    assert_eq!(stats.message_count, 1);
}

// ============================================================================
// Role Mutation & Toggle Coordination
// ============================================================================

#[tokio::test]
async fn test_grant_is_idempotent_and_silent() {
    let h = harness();
    let user = Snowflake::new(1);
    let role = Snowflake::new(10);

    h.platform.set_member_roles(user, vec![role]);

    let result = RoleService::new(&h.ctx)
        .grant_role(user, role, "test", "Manual Role Added", Provenance::SelfService)
        .await
        .unwrap();

    assert!(!result.added);
    assert!(result.removed_conflict.is_none());
    assert!(h.audit.records().is_empty(), "no-op grants must not audit");
}

#[tokio::test]
async fn test_toggle_pair_resolved_with_one_audit_record() {
    let role_a = Snowflake::new(10);
    let role_b = Snowflake::new(11);
    let h = harness_with(PolicyConfig {
        toggled_roles: vec![toggle(role_a, role_b)],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(1);

    h.platform.set_member_roles(user, vec![role_b]);

    let result = RoleService::new(&h.ctx)
        .grant_role(user, role_a, "switching sides", "Self Role Added", Provenance::SelfService)
        .await
        .unwrap();

    assert!(result.added);
    assert_eq!(result.removed_conflict, Some(role_b));

    let held = h.platform.roles_of(user);
    assert!(held.contains(&role_a));
    assert!(!held.contains(&role_b));

    let records = h.audit.records();
    assert_eq!(records.len(), 1, "one consolidated record for both changes");
    assert!(records[0].details.contains(&role_a.to_string()));
    assert!(records[0].details.contains(&role_b.to_string()));
}

#[tokio::test]
async fn test_toggle_lookup_works_in_both_directions() {
    let role_a = Snowflake::new(10);
    let role_b = Snowflake::new(11);
    let h = harness_with(PolicyConfig {
        toggled_roles: vec![toggle(role_a, role_b)],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(1);

    // The pair was configured as (a, b); granting b must still evict a
    h.platform.set_member_roles(user, vec![role_a]);

    let result = RoleService::new(&h.ctx)
        .grant_role(user, role_b, "", "Self Role Added", Provenance::SelfService)
        .await
        .unwrap();

    assert_eq!(result.removed_conflict, Some(role_a));
}

#[tokio::test]
async fn test_failed_toggle_removal_keeps_partial_state() {
    let role_a = Snowflake::new(10);
    let role_b = Snowflake::new(11);
    let h = harness_with(PolicyConfig {
        toggled_roles: vec![toggle(role_a, role_b)],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(1);

    h.platform.set_member_roles(user, vec![role_b]);
    h.platform.deny_removals();

    let err = RoleService::new(&h.ctx)
        .grant_role(user, role_a, "", "Self Role Added", Provenance::SelfService)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "PERMISSION_DENIED");

    // No rollback: the addition stands, the conflict remains
    let held = h.platform.roles_of(user);
    assert!(held.contains(&role_a));
    assert!(held.contains(&role_b));
    assert!(h.audit.records().is_empty(), "failed operations are not audited");
}

#[tokio::test]
async fn test_manual_grant_and_revoke_roundtrip() {
    let h = harness();
    let user = Snowflake::new(1);
    let role = Snowflake::new(10);
    let moderator = Snowflake::new(99);

    let commands = CommandService::new(&h.ctx);

    let result = commands
        .grant_role_manual(user, role, Some("probation over"), moderator)
        .await
        .unwrap();
    assert!(result.added);
    assert!(h.platform.roles_of(user).contains(&role));

    let removed = commands
        .revoke_role_manual(user, role, None, moderator)
        .await
        .unwrap();
    assert!(removed);
    assert!(!h.platform.roles_of(user).contains(&role));

    // A second revoke is a quiet no-op
    let removed_again = commands
        .revoke_role_manual(user, role, None, moderator)
        .await
        .unwrap();
    assert!(!removed_again);
    assert_eq!(h.audit.records().len(), 2);
}

// ============================================================================
// Self-Service Roles
// ============================================================================

#[tokio::test]
async fn test_self_role_toggles_on_and_off() {
    let role = Snowflake::new(42);
    let h = harness_with(PolicyConfig {
        self_assignable_roles: vec![role],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(1);

    let commands = CommandService::new(&h.ctx);

    let outcome = commands.toggle_self_role(user, role).await.unwrap();
    assert_eq!(outcome, SelfRoleOutcome::Added);
    assert!(h.platform.roles_of(user).contains(&role));

    let outcome = commands.toggle_self_role(user, role).await.unwrap();
    assert_eq!(outcome, SelfRoleOutcome::Removed);
    assert!(!h.platform.roles_of(user).contains(&role));
}

#[tokio::test]
async fn test_unlisted_role_is_not_self_assignable() {
    let h = harness();
    let user = Snowflake::new(1);

    let err = CommandService::new(&h.ctx)
        .toggle_self_role(user, Snowflake::new(42))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_SELF_ASSIGNABLE");
    assert!(err.user_message().contains("42"));
}

//! Promotion evaluation scenario tests

use integration_tests::{harness_with, message_event, rule, voice_event};
use steward_common::PolicyConfig;
use steward_core::entities::VoiceTransition;
use steward_core::policy::RuleLogic;
use steward_core::traits::ActivityEventRepository;
use steward_core::value_objects::Snowflake;
use steward_service::PromotionService;

const SOURCE: Snowflake = Snowflake::new(1);
const TIER_ONE: Snowflake = Snowflake::new(2);
const TIER_TWO: Snowflake = Snowflake::new(3);

#[tokio::test]
async fn test_at_most_one_rule_fires_per_evaluation() {
    // Both rules are satisfied by the same burst of messages
    let h = harness_with(PolicyConfig {
        promotion_rules: vec![
            rule("tier-one", SOURCE, TIER_ONE, 5, 0, RuleLogic::Any),
            rule("tier-two", SOURCE, TIER_TWO, 5, 0, RuleLogic::Any),
        ],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(100);
    h.platform.set_member_roles(user, vec![SOURCE]);

    for i in 0..10 {
        h.events.append(&message_event(user, i)).await.unwrap();
    }

    let outcome = PromotionService::new(&h.ctx)
        .check_for_promotion(user)
        .await
        .unwrap()
        .expect("a rule should fire");

    assert_eq!(outcome.rule_name, "tier-one");
    let held = h.platform.roles_of(user);
    assert!(held.contains(&TIER_ONE));
    assert!(!held.contains(&TIER_TWO), "only the first rule may apply");
}

#[tokio::test]
async fn test_next_tier_fires_on_a_later_pass() {
    let h = harness_with(PolicyConfig {
        promotion_rules: vec![
            rule("tier-one", SOURCE, TIER_ONE, 5, 0, RuleLogic::Any),
            rule("tier-two", SOURCE, TIER_TWO, 5, 0, RuleLogic::Any),
        ],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(100);
    h.platform.set_member_roles(user, vec![SOURCE]);

    for i in 0..10 {
        h.events.append(&message_event(user, i)).await.unwrap();
    }

    let service = PromotionService::new(&h.ctx);
    service.check_for_promotion(user).await.unwrap();
    let second = service
        .check_for_promotion(user)
        .await
        .unwrap()
        .expect("second pass promotes the next tier");

    assert_eq!(second.rule_name, "tier-two");
    assert!(h.platform.roles_of(user).contains(&TIER_TWO));
}

#[tokio::test]
async fn test_and_logic_requires_both_thresholds() {
    // 501 messages, zero voice minutes, thresholds 500 msgs AND 600 min
    let h = harness_with(PolicyConfig {
        promotion_rules: vec![rule("regulars", SOURCE, TIER_ONE, 500, 600, RuleLogic::All)],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(100);
    h.platform.set_member_roles(user, vec![SOURCE]);

    for i in 0..501 {
        h.events.append(&message_event(user, i)).await.unwrap();
    }

    let outcome = PromotionService::new(&h.ctx)
        .check_for_promotion(user)
        .await
        .unwrap();
    assert!(outcome.is_none(), "AND logic must not promote on messages alone");
    assert!(!h.platform.roles_of(user).contains(&TIER_ONE));
}

#[tokio::test]
async fn test_or_logic_promotes_exactly_once() {
    let h = harness_with(PolicyConfig {
        promotion_rules: vec![rule("regulars", SOURCE, TIER_ONE, 500, 600, RuleLogic::Any)],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(100);
    h.platform.set_member_roles(user, vec![SOURCE]);

    for i in 0..501 {
        h.events.append(&message_event(user, i)).await.unwrap();
    }

    let service = PromotionService::new(&h.ctx);
    let outcome = service
        .check_for_promotion(user)
        .await
        .unwrap()
        .expect("OR logic promotes on the message threshold");
    assert!(outcome.result.added);
    assert!(h.platform.roles_of(user).contains(&TIER_ONE));

    // The user now holds the target, so the rule is no longer eligible
    let repeat = service.check_for_promotion(user).await.unwrap();
    assert!(repeat.is_none());
    assert_eq!(h.audit.records().len(), 1, "exactly one grant was audited");
}

#[tokio::test]
async fn test_voice_threshold_alone_satisfies_or_logic() {
    let h = harness_with(PolicyConfig {
        promotion_rules: vec![rule("voice-folk", SOURCE, TIER_ONE, 500, 10, RuleLogic::Any)],
        ..PolicyConfig::default()
    });
    let user = Snowflake::new(100);
    h.platform.set_member_roles(user, vec![SOURCE]);

    for event in [
        voice_event(user, 0, VoiceTransition::Join),
        voice_event(user, 660, VoiceTransition::Leave),
    ] {
        h.events.append(&event).await.unwrap();
    }

    let outcome = PromotionService::new(&h.ctx)
        .check_for_promotion(user)
        .await
        .unwrap();
    assert!(outcome.is_some());
}

#[tokio::test]
async fn test_no_rules_configured_is_a_quiet_pass() {
    let h = harness_with(PolicyConfig::default());
    let user = Snowflake::new(100);

    let outcome = PromotionService::new(&h.ctx)
        .check_for_promotion(user)
        .await
        .unwrap();
    assert!(outcome.is_none());
}

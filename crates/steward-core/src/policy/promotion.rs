//! Promotion rules - configured threshold policies for automatic role grants

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::UserStats;
use crate::value_objects::Snowflake;

/// How a rule combines its two thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLogic {
    /// Both thresholds must be met
    All,
    /// Either threshold is enough
    Any,
}

/// A configured promotion rule
///
/// Rules are supplied by configuration in a fixed order; evaluation walks
/// that order and applies at most one rule per pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionRule {
    /// Policy name, used for provenance and audit attribution
    pub name: String,
    /// Role the user must currently hold for the rule to apply
    pub source_role: Snowflake,
    /// Role granted when the rule fires
    pub target_role: Snowflake,
    /// Message-count threshold
    pub min_messages: u64,
    /// Voice-minutes threshold
    pub min_voice_minutes: u64,
    /// Threshold combination logic
    pub logic: RuleLogic,
}

impl PromotionRule {
    /// A rule applies only to users holding the source role who do not
    /// already hold the target role.
    pub fn is_eligible(&self, held_roles: &HashSet<Snowflake>) -> bool {
        held_roles.contains(&self.source_role) && !held_roles.contains(&self.target_role)
    }

    /// Check the activity thresholds against derived stats
    pub fn thresholds_met(&self, stats: &UserStats) -> bool {
        let met_messages = stats.message_count >= self.min_messages;
        let met_voice = stats.voice_minutes >= self.min_voice_minutes;
        match self.logic {
            RuleLogic::All => met_messages && met_voice,
            RuleLogic::Any => met_messages || met_voice,
        }
    }
}

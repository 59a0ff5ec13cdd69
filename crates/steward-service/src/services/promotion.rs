//! Promotion rule evaluator
//!
//! Walks the configured rules in order and applies at most one per pass.
//! Stopping at the first satisfied rule keeps a single burst of activity
//! from cascading a user through several tiers in one evaluation.

use std::collections::HashSet;

use tracing::{info, instrument};

use steward_core::entities::UserStats;
use steward_core::policy::PromotionRule;
use steward_core::value_objects::{Provenance, Snowflake};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::roles::{MutationResult, RoleService};

/// Outcome of a promotion pass that found a satisfied rule
#[derive(Debug, Clone)]
pub struct PromotionOutcome {
    pub rule_name: String,
    pub target_role: Snowflake,
    pub result: MutationResult,
}

/// Promotion evaluation service
pub struct PromotionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PromotionService<'a> {
    /// Create a new PromotionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Recompute stats and apply the first satisfied rule, if any
    ///
    /// Called after message and voice-leave events; returns `None` when no
    /// eligible rule is satisfied or no rules are configured.
    #[instrument(skip(self))]
    pub async fn check_for_promotion(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Option<PromotionOutcome>> {
        if self.ctx.rules().is_empty() {
            return Ok(None);
        }

        let stats = ActivityService::new(self.ctx).compute_stats(user_id).await?;

        let held: HashSet<Snowflake> = self
            .ctx
            .platform()
            .member_roles(user_id)
            .await
            .map_err(steward_core::DomainError::from)?
            .into_iter()
            .collect();

        let Some(rule) = evaluate(&stats, &held, self.ctx.rules()) else {
            return Ok(None);
        };

        let result = RoleService::new(self.ctx)
            .grant_role(
                user_id,
                rule.target_role,
                &format!("Automatic promotion: {}", rule.name),
                "Automatic Promotion",
                Provenance::system(&rule.name),
            )
            .await?;

        if result.added {
            info!(
                user_id = %user_id,
                rule = %rule.name,
                target_role = %rule.target_role,
                "User promoted"
            );
        }

        Ok(Some(PromotionOutcome {
            rule_name: rule.name.clone(),
            target_role: rule.target_role,
            result,
        }))
    }
}

/// Select the first eligible rule whose thresholds are satisfied
///
/// Never returns more than one rule per call, even when several are
/// simultaneously satisfied.
pub fn evaluate<'r>(
    stats: &UserStats,
    held_roles: &HashSet<Snowflake>,
    rules: &'r [PromotionRule],
) -> Option<&'r PromotionRule> {
    rules
        .iter()
        .find(|rule| rule.is_eligible(held_roles) && rule.thresholds_met(stats))
}

//! Policy configuration types consumed (not owned) by the engine

mod promotion;
mod toggle;

pub use promotion::{PromotionRule, RuleLogic};
pub use toggle::{TogglePair, TogglePairError, ToggleRegistry};

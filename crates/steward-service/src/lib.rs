//! # steward-service
//!
//! Application layer: the activity aggregator, promotion evaluator, role
//! mutation & toggle coordinator, role-state reconciler, gateway event
//! dispatcher, and the command facade exposed to the front-end.

pub mod services;

pub use services::{
    ActivityService, CommandService, EventDispatcher, EventWorker, MemberRoles, MutationResult,
    PromotionOutcome, PromotionService, ReconcileService, RoleService, SelfRoleOutcome,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, TracingAuditSink,
};

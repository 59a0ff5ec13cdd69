//! # steward-db
//!
//! Persistence layer implementing the core repository ports with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> model mappers (enum columns stored as stable strings)
//! - Repository implementations for the event store and role state
//!
//! ## Usage
//!
//! ```rust,ignore
//! use steward_common::AppConfig;
//! use steward_db::{create_pool, run_migrations, PgActivityEventRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!     let events = PgActivityEventRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{PgActivityEventRepository, PgRoleStateRepository};

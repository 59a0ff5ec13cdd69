//! Error handling utilities for repositories

use steward_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Every storage failure maps to the persistence taxonomy; callers never
/// see raw driver errors.
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Persistence(e.to_string())
}

/// A stored value that no longer parses is corruption, not bad input
pub fn corrupt_row(table: &str, column: &str, value: &str) -> DomainError {
    DomainError::Persistence(format!(
        "corrupt row in {table}: unrecognized {column} value '{value}'"
    ))
}

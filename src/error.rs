//! Domain error types for the calculation core.
//!
//! Spec §7 separates four error kinds: validation errors (surfaced
//! synchronously, never persisted), closure violations, not-found errors,
//! and infrastructure errors from the repository collaborators. The pure
//! calculators never fail — they embed calculation-condition errors in the
//! `DailyResult`/`DailyValue` instead (see [`crate::model::daily_value::ErrorCode`]).

use thiserror::Error;

/// Errors a repository implementation can surface to the core.
///
/// Every concrete repository (see [`crate::repository::sqlite`]) returns
/// this error type so that services never depend on a specific storage
/// engine's error representation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("record not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound,
            other => RepositoryError::Backend(other.to_string()),
        }
    }
}

/// Errors the calculation core's services can return (spec §7).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input out of range or a required field missing. Surfaced
    /// synchronously; never persisted.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mutation was attempted against a closed month.
    #[error("month {year}-{month:02} is closed for employee {employee}")]
    MonthClosed { employee: String, year: i32, month: u32 },

    /// A referenced entity (employee, day plan, booking, ...) does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// An infrastructure/repository failure propagated from a collaborator.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type CoreResult<T> = Result<T, CoreError>;

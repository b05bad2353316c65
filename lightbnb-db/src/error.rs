//! Error types for lightbnb-db
//!
//! Repositories return [`DbError`]. The [`crate::Database`] accessors are the
//! one place it is logged and turned into `None`.

use thiserror::Error;

use crate::models::ValidationError;

/// Database layer error
#[derive(Debug, Error)]
pub enum DbError {
    /// Connectivity, SQL or constraint failure reported by the driver
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Input rejected before any SQL was issued
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Unusable connection configuration
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for lightbnb-db operations
pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

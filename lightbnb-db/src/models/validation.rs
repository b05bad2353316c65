//! Validation error types

use std::fmt;

/// Validation error for search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Numeric input below its allowed minimum
    OutOfRange { field: &'static str, min: i64 },

    /// Value cannot be carried in the column's integer type
    Unrepresentable { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, min } => {
                write!(f, "{} must be at least {}", field, min)
            }
            Self::Unrepresentable { field, value } => {
                write!(f, "{} value '{}' is out of range", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

//! SQL assembly
//!
//! [`builder`] renders clause fragments with numbered `$n` placeholders;
//! [`properties`] uses it for the filtered property search.

pub mod builder;
pub mod properties;

pub use builder::{BuiltQuery, ClauseJoining, Fragment, SelectBuilder, SqlValue};
pub use properties::{PropertySearch, DEFAULT_PROPERTY_LIMIT};

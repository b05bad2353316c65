//! lightbnb-db: PostgreSQL data access for LightBnB
//!
//! Fetches users, reservations and properties, and inserts users and
//! properties. Property search takes any subset of [`FilterOptions`] and is
//! rendered by a structured builder with numbered `$n` placeholders.
//!
//! ```ignore
//! let db = Database::connect(&DbConfig::from_env()?).await?;
//! let filters = FilterOptions::new().city("Vancouver");
//! let rows = db.get_all_properties(&filters, DEFAULT_PROPERTY_LIMIT).await;
//! db.close().await;
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod query;
pub mod repos;

pub use config::DbConfig;
pub use database::Database;
pub use error::{DbError, Result};
pub use models::{
    FilterOptions, NewProperty, NewUser, Property, PropertyWithRating, Reservation, User,
    ValidationError,
};
pub use query::{BuiltQuery, ClauseJoining, PropertySearch, SqlValue, DEFAULT_PROPERTY_LIMIT};

//! Domain models
//!
//! Row types derive `sqlx::FromRow` and map column-for-column onto the
//! LightBnB schema in [`crate::migrations`].

pub mod validation;
pub mod filters;
pub mod user;
pub mod property;
pub mod reservation;

pub use validation::ValidationError;
pub use filters::FilterOptions;
pub use user::{NewUser, User};
pub use property::{NewProperty, Property, PropertyWithRating};
pub use reservation::Reservation;

//! Repository implementations for database access
//!
//! Each repository borrows the pool and returns [`crate::Result`]; callers
//! decide how to handle failures.

pub mod users;
pub mod reservations;
pub mod properties;

pub use users::UserRepo;
pub use reservations::ReservationRepo;
pub use properties::PropertyRepo;

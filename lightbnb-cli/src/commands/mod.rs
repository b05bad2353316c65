//! Subcommand implementations

pub mod properties;
pub mod reservations;
pub mod users;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

pub use properties::{run_add_property, run_properties, AddPropertyArgs, PropertiesArgs};
pub use reservations::{run_reservations, ReservationsArgs};
pub use users::{run_add_user, run_user, AddUserArgs, UserArgs};

/// Print a value as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Accessors report both failures and missing rows as `None`.
fn require<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("no {} returned (not found, or the query failed; see log)", what))
}

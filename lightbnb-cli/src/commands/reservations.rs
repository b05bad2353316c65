//! Reservation listing

use anyhow::Result;
use clap::Parser;
use lightbnb_db::Database;

use super::{print_json, require};

#[derive(Parser, Debug)]
pub struct ReservationsArgs {
    /// Guest whose reservations to list
    #[arg(long)]
    pub guest_id: i32,
}

pub async fn run_reservations(args: ReservationsArgs, db: &Database) -> Result<()> {
    let rows = db.get_all_reservations(args.guest_id).await;
    print_json(&require(rows, "reservations")?)
}

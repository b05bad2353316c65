//! Property search and insertion

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lightbnb_db::{
    ClauseJoining, Database, FilterOptions, NewProperty, PropertySearch, DEFAULT_PROPERTY_LIMIT,
};
use rust_decimal::Decimal;

use super::{print_json, require};

#[derive(Parser, Debug)]
pub struct PropertiesArgs {
    /// Match properties whose city contains this text
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum nightly price in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub min_price: Option<Decimal>,

    /// Maximum nightly price in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub max_price: Option<Decimal>,

    /// Minimum average review rating
    #[arg(long)]
    pub min_rating: Option<Decimal>,

    /// Maximum number of properties to return
    #[arg(long, default_value_t = DEFAULT_PROPERTY_LIMIT)]
    pub limit: u32,

    /// Keep each condition's written keyword (owner/price filters without a city render a leading AND)
    #[arg(long)]
    pub verbatim_joining: bool,

    /// Print the generated SQL and parameters without connecting
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl PropertiesArgs {
    pub fn filters(&self) -> FilterOptions {
        FilterOptions {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }

    pub fn joining(&self) -> ClauseJoining {
        if self.verbatim_joining {
            ClauseJoining::Verbatim
        } else {
            ClauseJoining::Normalized
        }
    }
}

/// Render the search without touching the database.
pub fn print_dry_run(args: &PropertiesArgs) -> Result<()> {
    let filters = args.filters();
    let built = PropertySearch::new(&filters)
        .limit(args.limit)
        .joining(args.joining())
        .build()
        .context("invalid search")?;

    println!("{}", built.sql);
    println!("-- params: {}", built.params_display());
    Ok(())
}

pub async fn run_properties(args: PropertiesArgs, db: &Database) -> Result<()> {
    let db = db.clone().with_joining(args.joining());
    let rows = db.get_all_properties(&args.filters(), args.limit).await;
    print_json(&require(rows, "properties")?)
}

#[derive(Parser, Debug)]
pub struct AddPropertyArgs {
    /// JSON file with the property fields (reads stdin if not provided)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

pub async fn run_add_property(args: AddPropertyArgs, db: &Database) -> Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read property from stdin")?;
            buf
        }
    };

    let property: NewProperty =
        serde_json::from_str(&text).context("property JSON is missing fields or malformed")?;
    let rows = db.add_property(&property).await;
    print_json(&require(rows, "property")?)
}

//! lightbnb CLI - LightBnB database access from the command line
//!
//! Provides:
//! - Property search with optional filters (`properties`, with `--dry-run` to show the SQL)
//! - User lookup and creation (`user`, `add-user`)
//! - Reservation listing for a guest (`reservations`)
//! - Property creation from JSON (`add-property`)
//! - Schema bootstrap (`migrate`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{Database, DbConfig};
use tracing::info;

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and update the LightBnB rental database",
    long_about = "Search properties with optional filters, look up users and reservations, \
                  and insert users and properties in the LightBnB PostgreSQL database."
)]
struct Cli {
    /// PostgreSQL connection string (overrides --config and LIGHTBNB_DB_* variables)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// TOML file with connection settings
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (prints generated SQL and parameters)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search properties, cheapest first
    Properties(commands::PropertiesArgs),
    /// Look up a user by email pattern or id
    User(commands::UserArgs),
    /// Create a user
    AddUser(commands::AddUserArgs),
    /// List a guest's reservations by start date
    Reservations(commands::ReservationsArgs),
    /// Create a property from JSON
    AddProperty(commands::AddPropertyArgs),
    /// Create any missing LightBnB tables
    Migrate,
}

fn resolve_config(cli: &Cli) -> Result<DbConfig> {
    let config = DbConfig::from_env()?;
    let config = match &cli.config {
        Some(path) => config.overlay_file(path)?,
        None => config,
    };

    Ok(match &cli.database_url {
        Some(url) => config.with_url(url.clone()),
        None => config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init_tracing(&TracingConfig { debug: cli.debug }).ok();

    if let Commands::Properties(args) = &cli.command {
        if args.dry_run {
            return commands::properties::print_dry_run(args);
        }
    }

    let config = resolve_config(&cli)?;
    let db = Database::connect(&config)
        .await
        .context("failed to connect to database")?;

    let result = match cli.command {
        Commands::Properties(args) => commands::run_properties(args, &db).await,
        Commands::User(args) => commands::run_user(args, &db).await,
        Commands::AddUser(args) => commands::run_add_user(args, &db).await,
        Commands::Reservations(args) => commands::run_reservations(args, &db).await,
        Commands::AddProperty(args) => commands::run_add_property(args, &db).await,
        Commands::Migrate => db
            .migrate()
            .await
            .map(|()| info!("schema is up to date"))
            .context("migration failed"),
    };

    db.close().await;
    result
}

//! Command-line interface for carjai-seed
//!
//! # Usage Examples
//!
//! ```bash
//! # Seed everything
//! carjai-seed --all
//!
//! # Only accounts and cars, reproducibly
//! carjai-seed --users --cars --seed 42
//!
//! # Market prices from a specific document
//! carjai-seed --market-price --market-price-pdf ./price2568.pdf
//! ```
//!
//! Connection settings come from `DB_HOST`, `DB_PORT`, `DB_USER`,
//! `DB_PASSWORD`, `DB_NAME` and `DB_SSLMODE` or the matching `--db-*` flags.

use anyhow::Context;
use carjai_seed::{run_phases, DatabaseArgs, PhaseFlags};
use clap::{CommandFactory, Parser};
use seed_catalog::Catalog;
use seed_generator::SeedGenerator;
use seed_populate::{PostgreSQLStore, SeedArgs, Seeder};
use tracing::info;

const EXAMPLES: &str = "\
Examples:
  carjai-seed --all                       Seed everything
  carjai-seed --users                     Seed only users
  carjai-seed --cars                      Seed only cars
  carjai-seed --reports                   Seed only reports (needs users and cars)
  carjai-seed --favorites                 Seed only favorites (needs buyers and cars)
  carjai-seed --recent-views              Seed only recent views (needs buyers and cars)
  carjai-seed --market-price              Import market prices from the price list PDF
  carjai-seed --users --cars --seed 42    Combine phases with a fixed seed";

#[derive(Parser)]
#[command(name = "carjai-seed")]
#[command(about = "Unified seeding tool for CarJai database")]
#[command(after_help = EXAMPLES)]
struct Cli {
    #[command(flatten)]
    phases: PhaseFlags,

    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    seed: SeedArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let phases = cli.phases.selection();
    if phases.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        std::process::exit(1);
    }

    let pg_config = cli
        .database
        .to_pg_config()
        .context("Invalid database configuration")?;

    let catalog = match &cli.seed.catalog {
        Some(path) => Catalog::from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::builtin().context("Failed to load built-in catalog")?,
    };
    info!("Loaded catalog version {}", catalog.version);

    let seed = cli.seed.seed.unwrap_or_else(rand::random::<u64>);
    info!("Using random seed {seed} (pass --seed {seed} to replay this run)");

    info!("Connecting to {}", cli.database.display_target());
    let store = PostgreSQLStore::connect(&pg_config)
        .await
        .context("Failed to connect to database")?;

    let mut seeder = Seeder::new(store, SeedGenerator::new(catalog, seed), cli.seed.options())
        .with_hasher(cli.seed.password_scheme.hasher());

    run_phases(&mut seeder, &phases).await?;
    Ok(())
}

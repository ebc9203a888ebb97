mod auth;
mod cli;
mod config;
mod db;
mod error;
mod logic;
mod models;
mod pdf;
mod routes;
mod server;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use db::Database;
use logic::SuitabilityEngine;
use models::SoilSample;
use server::AppState;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "soilcheck=info,tower_http=info,warn",
        1 => "soilcheck=debug,tower_http=debug,info",
        _ => "soilcheck=trace,tower_http=trace,debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = Config::load(cli.config.as_ref()).context("loading configuration")?;
            let db_path = Config::db_path(cli.data_dir.as_ref())?;
            let db = Database::open(&db_path)
                .with_context(|| format!("opening database at {}", db_path.display()))?;
            tracing::info!(db = %db.path().display(), "Database ready");

            server::serve(AppState::new(config, db)).await?;
        }
        Commands::Init => {
            Config::setup_interactive()?;
        }
        Commands::Check => run_check(cli.config.as_ref(), cli.data_dir.as_ref())?,
        Commands::Classify { input } => run_classify(&input)?,
        Commands::Rules => {
            for (id, name) in SuitabilityEngine::new().list_rules() {
                println!("{:<20} {}", id, name);
            }
        }
    }

    Ok(())
}

fn run_check(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_path).context("loading configuration")?;
    println!("Configuration: OK");
    println!("  bind address: {}", config.server.bind_addr());
    println!("  CORS origins: {}", config.server.cors_origins.join(", "));
    println!("  token lifetime: {} days", config.auth.token_ttl_days);

    let db_path = Config::db_path(data_dir)?;
    let db = Database::open(&db_path)
        .with_context(|| format!("opening database at {}", db_path.display()))?;
    println!(
        "Database: OK ({}, schema v{}/{})",
        db.path().display(),
        db::migrations::current_version(&db)?,
        db::migrations::latest_version()
    );

    Ok(())
}

fn run_classify(input: &Path) -> anyhow::Result<()> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?
    };

    let value: serde_json::Value = serde_json::from_str(&raw).context("parsing soil sample")?;
    // Accept either a bare sample or the API request shape
    let sample_value = value.get("soil_data").cloned().unwrap_or(value);
    let sample: SoilSample =
        serde_json::from_value(sample_value).context("soil sample values must be numeric")?;

    let result = SuitabilityEngine::new().analyze(&sample);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "soilcheck",
    version,
    about = "Soil classification and construction suitability API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    Serve,
    /// Interactive configuration setup
    Init,
    /// Validate config and database
    Check,
    /// Classify a soil sample from a JSON file ("-" for stdin) without storing it
    Classify {
        /// JSON object with LL, PL, PI, G, CS, MS, FS, F, OMC%, MDD (kN/m3), NMC (%)
        input: PathBuf,
    },
    /// List the suitability scoring rules
    Rules,
}

//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod lookup;
pub mod pick;
pub mod serve;

use clap::{Parser, Subcommand};

/// Interactive map location picker
#[derive(Parser)]
#[command(name = "pindrop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a location interactively in the terminal
    Pick(pick::PickArgs),

    /// Reverse geocode a coordinate pair
    Lookup(lookup::LookupArgs),

    /// Start the web picker (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pick(args) => pick::run(args).await,
        Commands::Lookup(args) => lookup::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

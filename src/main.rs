//! pindrop CLI entry point
//!
//! Interactive map location picker - CLI + web app

use pindrop::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

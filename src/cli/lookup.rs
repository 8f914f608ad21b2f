//! Lookup command handler
//!
//! One-shot reverse geocode of a coordinate pair, no session involved.

use crate::config::Config;
use crate::constants::picker::MAX_ADDRESS_RESULTS;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::{get_geocoder, Geocoder};
use crate::picker::address::shorten_address;
use clap::Args;

/// Lookup command arguments
#[derive(Args)]
pub struct LookupArgs {
    /// Latitude
    #[arg(long)]
    pub lat: f64,

    /// Longitude
    #[arg(long)]
    pub lng: f64,

    /// Output raw JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the lookup command
pub async fn run(args: LookupArgs) -> Result<()> {
    let config = Config::load()?;

    let coords = Coordinates::new(args.lat, args.lng);
    coords.validate()?;

    let geocoder = get_geocoder(&config.geocoder);
    let addresses = geocoder.reverse(coords, MAX_ADDRESS_RESULTS).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&addresses)?);
        return Ok(());
    }

    match addresses.first() {
        Some(best) => {
            println!("Address: {}", best.display_name);
            println!("Short:   {}", shorten_address(&best.display_name));
        }
        None => println!("No address found at ({:.6}, {:.6})", coords.lat, coords.lng),
    }

    Ok(())
}

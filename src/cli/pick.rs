//! Pick command handler
//!
//! Runs a full picker session in the terminal. Stdin commands stand in for
//! the map surface: `pan` settles the camera at a new center, `move` starts
//! a drag, `confirm` chooses the current position.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::get_formatter;
use crate::geo::{get_geocoder, get_ip_locator};
use crate::picker::panel::ResultsPanel;
use crate::picker::{PickerEvent, PickerRequest, PickerSession};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Pick command arguments
#[derive(Args)]
pub struct PickArgs {
    /// Starting latitude
    #[arg(long)]
    pub lat: Option<f64>,

    /// Starting longitude
    #[arg(long)]
    pub lng: Option<f64>,

    /// Start from the current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,

    /// Starting zoom level
    #[arg(long, short = 'z')]
    pub zoom: Option<f32>,

    /// Allow confirming without an address
    #[arg(long)]
    pub address_optional: bool,

    /// Don't display raw coordinates in the panel
    #[arg(long)]
    pub no_coords: bool,

    /// Output format for the confirmed pick
    #[arg(long, short = 'f')]
    pub format: Option<String>,
}

/// Panel that prints to the terminal
struct TerminalPanel {
    show_coordinates: bool,
    showing: bool,
}

impl TerminalPanel {
    fn new(show_coordinates: bool) -> Self {
        Self {
            show_coordinates,
            showing: false,
        }
    }
}

impl ResultsPanel for TerminalPanel {
    fn show_loading(&mut self) {
        self.showing = true;
        println!("  Looking up address...");
    }

    fn set_details(&mut self, lat: f64, lng: f64, short_address: &str, full_address: &str) {
        self.showing = true;
        if self.show_coordinates {
            println!("  Position: ({:.6}, {:.6})", lat, lng);
        }
        if full_address.is_empty() {
            println!("  Address: (none found)");
        } else {
            println!("  Address: {}", full_address);
            println!("  Short:   {}", short_address);
        }
    }

    fn dismiss(&mut self) {
        self.showing = false;
    }

    fn is_showing(&self) -> bool {
        self.showing
    }

    fn show_notice(&mut self, text: &str) {
        println!("  ! {}", text);
    }
}

/// Run the pick command
pub async fn run(args: PickArgs) -> Result<()> {
    // Lookup failures are logged, not surfaced; make the log visible
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::load()?;

    // Determine starting center
    let center = if args.here || (args.lat.is_none() && config.location.default_here) {
        let location = get_ip_locator().locate().await?;
        eprintln!("Starting from IP location: {}", location.label);
        location.coords
    } else if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        Coordinates::new(lat, lng)
    } else {
        Coordinates::new(config.defaults.latitude, config.defaults.longitude)
    };
    center.validate()?;

    let request = PickerRequest {
        initial_latitude: center.lat,
        initial_longitude: center.lng,
        zoom: args.zoom.unwrap_or(config.defaults.zoom),
        show_coordinates: config.defaults.show_coordinates && !args.no_coords,
        address_required: config.defaults.address_required && !args.address_optional,
    };

    let geocoder = get_geocoder(&config.geocoder);
    let panel = TerminalPanel::new(request.show_coordinates);
    let session = PickerSession::new(request, geocoder, panel);

    let (events, rx) = mpsc::channel(16);
    let mut running = tokio::spawn(session.run(rx));

    println!("Map centered at ({:.6}, {:.6}), zoom {}", center.lat, center.lng, request.zoom);
    print_help();

    // The initial view counts as a settled camera
    let _ = events.send(PickerEvent::CameraIdle { center }).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let outcome = loop {
        tokio::select! {
            finished = &mut running => break finished,
            line = lines.next_line() => match line? {
                Some(line) => {
                    if let Some(event) = parse_command(&line) {
                        let _ = events.send(event).await;
                    }
                }
                // stdin closed: leave without choosing
                None => {
                    let _ = events.send(PickerEvent::Cancel).await;
                    break (&mut running).await;
                }
            },
        }
    };

    match outcome.map_err(|e| crate::error::Error::Picker(e.to_string()))? {
        Some(result) => {
            let format = args.format.unwrap_or(config.defaults.format.clone());
            let formatter = get_formatter(&format)
                .ok_or_else(|| crate::error::Error::Config(format!("Unknown format: {}", format)))?;
            println!("{}", formatter.format(&result, &config)?);
            Ok(())
        }
        None => {
            eprintln!("Cancelled, no location picked");
            Ok(())
        }
    }
}

/// Parse one stdin line into a picker event
fn parse_command(line: &str) -> Option<PickerEvent> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "pan" => {
            let lat = parts.next().and_then(|s| s.parse::<f64>().ok());
            let lng = parts.next().and_then(|s| s.parse::<f64>().ok());
            match (lat, lng) {
                (Some(lat), Some(lng)) => Some(PickerEvent::CameraIdle {
                    center: Coordinates::new(lat, lng),
                }),
                _ => {
                    eprintln!("Usage: pan <lat> <lng>");
                    None
                }
            }
        }
        "move" => Some(PickerEvent::CameraMoveStarted),
        "confirm" => Some(PickerEvent::Confirm),
        "cancel" | "quit" | "exit" => Some(PickerEvent::Cancel),
        "help" => {
            print_help();
            None
        }
        other => {
            eprintln!("Unknown command: {} (try 'help')", other);
            None
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  pan <lat> <lng>  settle the map at a new center");
    println!("  move             start dragging (hides details)");
    println!("  confirm          choose this place");
    println!("  cancel           leave without choosing");
}

//! mapfence CLI - Command-line interface
//!
//! One-shot commands query the map services directly; `session` runs the
//! full coordinator behind a line-based prompt.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mapfence::coord::Coordinate;

use commands::config::ConfigCommands;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "mapfence")]
#[command(version = mapfence::VERSION)]
#[command(about = "Address search, routing and geofence alerts on OpenStreetMap", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.mapfence/config.ini
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging (also echoed to stdout)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up places matching a free-text address
    Geocode {
        /// Address or place name
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Find points of interest around a location
    Poi {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Amenity to look for (default from [poi] keyword)
        #[arg(long)]
        keyword: Option<String>,

        /// Search radius in meters (default from [poi] radius)
        #[arg(long)]
        radius: Option<u32>,
    },

    /// Plan a driving route between two points
    Route {
        /// Start as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        from: Coordinate,

        /// Destination as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        to: Coordinate,
    },

    /// Show current weather at a location
    Weather {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Print the basemap tile URL covering a location
    Tile {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Zoom level (default from [map] zoom)
        #[arg(long)]
        zoom: Option<u8>,
    },

    /// Start an interactive map session
    Session {
        /// Replay positions from a track file instead of listening on UDP
        #[arg(long, value_name = "FILE")]
        replay: Option<PathBuf>,

        /// UDP port for XGPS position datagrams (default from [tracking] port)
        #[arg(long, conflicts_with = "replay")]
        port: Option<u16>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let runner = || CliRunner::new(cli.config.clone(), cli.debug);

    match cli.command {
        Commands::Geocode { query } => commands::geocode::run(&runner()?, &query.join(" ")).await,
        Commands::Poi {
            lat,
            lon,
            keyword,
            radius,
        } => {
            let args = commands::poi::PoiArgs {
                center: commands::coordinate(lat, lon)?,
                keyword,
                radius,
            };
            commands::poi::run(&runner()?, args).await
        }
        Commands::Route { from, to } => commands::route::run(&runner()?, from, to).await,
        Commands::Weather { lat, lon } => {
            let at = commands::coordinate(lat, lon)?;
            commands::weather::run(&runner()?, at).await
        }
        Commands::Tile { lat, lon, zoom } => {
            let at = commands::coordinate(lat, lon)?;
            commands::tile::run(&runner()?, at, zoom)
        }
        Commands::Session { replay, port } => {
            let args = commands::session::SessionArgs { replay, port };
            commands::session::run(&runner()?, args).await
        }
        // No runner: config commands must work even when the file does not parse
        Commands::Config { command } => commands::config::run(command, cli.config.clone()),
    }
}

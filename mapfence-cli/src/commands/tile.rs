//! Tile command - basemap tile URL for a location.

use mapfence::coord::{to_tile_coords, Coordinate};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the tile command.
pub fn run(runner: &CliRunner, at: Coordinate, zoom: Option<u8>) -> Result<(), CliError> {
    runner.log_startup("tile");
    let config = runner.config();
    let zoom = zoom.unwrap_or(config.map.zoom);

    let tile = to_tile_coords(&at, zoom).map_err(|e| CliError::Config(e.to_string()))?;
    let tiles = config.tile_source();

    println!("Tile: x={}, y={}, zoom={}", tile.x, tile.y, tile.zoom);
    println!("{}", tiles.tile_url(&tile));
    println!("{}", tiles.attribution());

    Ok(())
}

//! POI command - list amenities around a location.

use mapfence::coord::Coordinate;
use mapfence::provider::{OverpassPoiSearch, PoiQuery};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the poi command.
pub struct PoiArgs {
    pub center: Coordinate,
    pub keyword: Option<String>,
    pub radius: Option<u32>,
}

/// Run the poi command.
pub async fn run(runner: &CliRunner, args: PoiArgs) -> Result<(), CliError> {
    runner.log_startup("poi");
    let config = runner.config();

    // CLI > config
    let query = PoiQuery {
        center: args.center,
        keyword: args.keyword.unwrap_or_else(|| config.poi.keyword.clone()),
        radius_m: args.radius.unwrap_or(config.poi.radius),
    };

    let search = OverpassPoiSearch::new(runner.http_client()?, &config.services.poi_url)
        .with_max_results(config.poi.max_results);

    println!(
        "Searching for '{}' within {} m of {}...",
        query.keyword, query.radius_m, query.center
    );

    let pois = search
        .fetch(&query)
        .await
        .map_err(|error| CliError::Service {
            service: "POI search",
            error,
        })?;

    if pois.is_empty() {
        println!("Nothing found");
        return Ok(());
    }

    for (index, poi) in pois.iter().enumerate() {
        let distance = query.center.distance_to(&poi.coordinate);
        println!(
            "{:>2}. {} ({:.0} m, {})",
            index + 1,
            poi.label,
            distance,
            poi.coordinate
        );
    }

    Ok(())
}

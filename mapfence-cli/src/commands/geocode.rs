//! Geocode command - look up places for an address.

use mapfence::provider::NominatimGeocoder;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the geocode command.
pub async fn run(runner: &CliRunner, query: &str) -> Result<(), CliError> {
    runner.log_startup("geocode");
    let config = runner.config();

    let geocoder = NominatimGeocoder::new(runner.http_client()?, &config.services.geocoder_url)
        .with_max_results(config.search.max_results);

    let places = geocoder
        .fetch(query)
        .await
        .map_err(|error| CliError::Service {
            service: "Geocoder",
            error,
        })?;

    if places.is_empty() {
        println!("No places found for '{}'", query.trim());
        return Ok(());
    }

    for (index, place) in places.iter().enumerate() {
        println!("{:>2}. {}", index + 1, place.label);
        println!("    {}", place.coordinate);
    }

    Ok(())
}

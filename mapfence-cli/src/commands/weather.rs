//! Weather command - current conditions at a location.

use mapfence::coord::Coordinate;
use mapfence::provider::OpenMeteoWeather;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the weather command.
pub async fn run(runner: &CliRunner, at: Coordinate) -> Result<(), CliError> {
    runner.log_startup("weather");

    let weather = OpenMeteoWeather::new(runner.http_client()?, &runner.config().services.weather_url);
    let current = weather.fetch(at).await.map_err(|error| CliError::Service {
        service: "Weather",
        error,
    })?;

    println!("{}: {}", at, current);
    Ok(())
}

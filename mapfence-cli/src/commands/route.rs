//! Route command - plan a driving route.

use mapfence::coord::Coordinate;
use mapfence::provider::OsrmRouter;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the route command.
pub async fn run(runner: &CliRunner, from: Coordinate, to: Coordinate) -> Result<(), CliError> {
    runner.log_startup("route");

    let router = OsrmRouter::new(runner.http_client()?, &runner.config().services.router_url);

    println!("Routing {} -> {}", from, to);
    let plan = router
        .fetch(from, to)
        .await
        .map_err(|error| CliError::Service {
            service: "Router",
            error,
        })?;

    match plan.summary() {
        Some(summary) => {
            println!("{}", summary);
            println!("  Points: {}", plan.polyline.len());
        }
        None => println!("No route found"),
    }

    Ok(())
}

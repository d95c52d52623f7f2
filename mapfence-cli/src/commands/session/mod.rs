//! Session command - interactive map session.
//!
//! Runs the coordinator with live position tracking and reads one command
//! per line from stdin. Results from the map services and geofence alerts
//! are printed as they arrive.

mod input;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use mapfence::app::{
    Coordinator, CoordinatorClosed, CoordinatorHandle, HttpServices, Intent,
};
use mapfence::config::{ConfigFile, TrackingSourceKind};
use mapfence::map::{MapView, TileSource};
use mapfence::tracking::{GeolocationTracker, PositionSource, ReplaySource, UdpPositionSource};

use self::input::{SessionCommand, Target, HELP};
use self::render::{map_lines, place_lines, poi_lines, status_lines, Presenter};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the session command.
pub struct SessionArgs {
    pub replay: Option<PathBuf>,
    pub port: Option<u16>,
}

/// Whether the prompt loop keeps going.
enum Flow {
    Continue,
    Quit,
}

/// Run the session command.
pub async fn run(runner: &CliRunner, args: SessionArgs) -> Result<(), CliError> {
    runner.log_startup("session");
    let config = runner.config();
    let services = runner.services()?;

    // CLI > config
    let replay = match args.replay {
        Some(path) => Some(
            ReplaySource::new(path)
                .with_interval(Duration::from_millis(config.tracking.replay_interval_ms)),
        ),
        None if args.port.is_none() && config.tracking.source == TrackingSourceKind::Replay => {
            Some(config.replay_source().ok_or_else(|| {
                CliError::Config(
                    "[tracking] source = replay needs replay_file to be set".to_string(),
                )
            })?)
        }
        None => None,
    };

    match replay {
        Some(source) => {
            let label = format!("replay {}", source.path().display());
            drive(config, services, source, &label).await
        }
        None => {
            let port = args.port.unwrap_or(config.tracking.port);
            drive(config, services, UdpPositionSource::new(port), &format!("udp:{}", port)).await
        }
    }
}

/// Runs one session against a concrete position source.
async fn drive<P: PositionSource>(
    config: &ConfigFile,
    services: HttpServices,
    source: P,
    source_label: &str,
) -> Result<(), CliError> {
    let handle = Coordinator::new(
        services,
        GeolocationTracker::new(source),
        config.coordinator_config(),
    )
    .with_initial_state(config.initial_state())
    .start();
    let tiles = config.tile_source();
    let printer = spawn_printer(&handle);

    println!(
        "mapfence session, positions from {}. Type 'help' for commands.",
        source_label
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let outcome = loop {
        // EOF ends the session like 'quit'
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break Ok(()),
            Err(e) => break Err(CliError::Io(e)),
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match execute(&handle, command, &tiles, source_label).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break Ok(()),
            Err(CoordinatorClosed) => {
                break Err(CliError::Session("coordinator stopped".to_string()))
            }
        }
    };

    handle.shutdown().await;
    let _ = printer.await;
    info!("Session ended");

    outcome
}

/// Prints snapshot changes and notifications until the coordinator stops.
fn spawn_printer(handle: &CoordinatorHandle) -> JoinHandle<()> {
    let mut snapshots = handle.subscribe_state();
    let mut notifications = handle.notifications();

    tokio::spawn(async move {
        let mut presenter = Presenter::new(snapshots.borrow_and_update().clone());

        loop {
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let next = snapshots.borrow_and_update().clone();
                    for line in presenter.update(next) {
                        println!("{}", line);
                    }
                }
                notification = notifications.recv() => match notification {
                    Ok(notification) => println!("{}", notification),
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "Notification printer fell behind");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    })
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

/// Carries out one prompt command.
async fn execute(
    handle: &CoordinatorHandle,
    command: SessionCommand,
    tiles: &TileSource,
    source_label: &str,
) -> Result<Flow, CoordinatorClosed> {
    let state = handle.snapshot();

    let intent = match command {
        SessionCommand::Search(query) => Intent::SearchAddress(query),

        SessionCommand::Results => {
            if state.search.results.is_empty() {
                println!("No address results. Try 'search TEXT'.");
            } else {
                print_lines(place_lines(&state.search.results));
            }
            if !state.poi.results.is_empty() {
                println!("POIs ('{}'):", state.poi.keyword);
                print_lines(poi_lines(&state.poi.results, state.center));
            }
            return Ok(Flow::Continue);
        }

        SessionCommand::Pick(n) => match state.search.results.get(n - 1) {
            Some(place) => Intent::PickAddress(place.clone()),
            None => {
                println!("No address result {}", n);
                return Ok(Flow::Continue);
            }
        },

        SessionCommand::Endpoint { role, target } => {
            let coordinate = match target {
                Target::At(coordinate) => coordinate,
                Target::Result(n) => match state.search.results.get(n - 1) {
                    Some(place) => place.coordinate,
                    None => {
                        println!("No address result {}", n);
                        return Ok(Flow::Continue);
                    }
                },
            };
            println!("Route {} = {}", role, coordinate);
            Intent::SetRouteEndpoint { role, coordinate }
        }

        SessionCommand::Route => {
            if state.route.from.is_none() || state.route.to.is_none() {
                println!("Set both endpoints first ('from N', 'to N')");
            } else {
                println!("Planning route...");
            }
            Intent::PlanRoute
        }

        SessionCommand::Center(role) => {
            match state.endpoint(role) {
                Some(endpoint) => println!("Centered on {}", endpoint),
                None => println!("No '{}' endpoint set", role),
            }
            Intent::CenterOn(role)
        }

        SessionCommand::Poi { keyword, radius_m } => Intent::SearchPoi {
            keyword,
            radius_m: radius_m.unwrap_or(state.poi.radius_m),
        },

        SessionCommand::PickPoi(n) => match state.poi.results.get(n - 1) {
            Some(poi) => Intent::PickPoi(poi.clone()),
            None => {
                println!("No POI result {}", n);
                return Ok(Flow::Continue);
            }
        },

        SessionCommand::Fence(radius_m) => Intent::SetGeofenceHere { radius_m },

        SessionCommand::FenceAt { center, radius_m } => Intent::SetGeofence {
            center,
            radius_m: radius_m.unwrap_or(state.default_fence_radius_m),
        },

        SessionCommand::Click(at) => {
            if state.geofence.is_none() {
                println!("No geofence to move. Place one with 'fence' first.");
            }
            Intent::MapClick(at)
        }

        SessionCommand::Start => Intent::StartTracking,
        SessionCommand::Stop => Intent::StopTracking,
        SessionCommand::Weather => Intent::LoadWeather,

        SessionCommand::Status => {
            print_lines(status_lines(&state, source_label));
            return Ok(Flow::Continue);
        }

        SessionCommand::Map => {
            print_lines(map_lines(&MapView::from_state(&state), tiles));
            return Ok(Flow::Continue);
        }

        SessionCommand::Help => {
            println!("{}", HELP);
            return Ok(Flow::Continue);
        }

        SessionCommand::Quit => return Ok(Flow::Quit),
    };

    handle.dispatch(intent).await?;
    Ok(Flow::Continue)
}

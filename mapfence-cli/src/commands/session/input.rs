//! Parsing of session prompt lines.

use std::str::FromStr;

use mapfence::app::RouteRole;
use mapfence::coord::Coordinate;

/// Where a route endpoint comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// 1-based index into the current address results
    Result(usize),
    At(Coordinate),
}

/// One line typed at the session prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Search(String),
    Results,
    Pick(usize),
    Endpoint { role: RouteRole, target: Target },
    Route,
    Center(RouteRole),
    Poi { keyword: String, radius_m: Option<u32> },
    PickPoi(usize),
    Fence(Option<f64>),
    FenceAt { center: Coordinate, radius_m: Option<f64> },
    Click(Coordinate),
    Start,
    Stop,
    Weather,
    Status,
    Map,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search TEXT          look up an address (empty TEXT clears results)
  results              list the current address results
  pick N               drop a marker on result N and center on it
  from N|LAT,LON       set the route start
  to N|LAT,LON         set the route destination
  route                plan a route between the endpoints
  center from|to       center the map on a route endpoint
  poi KEYWORD [R]      search amenities within R meters of the center
  pickpoi N            drop a marker on POI result N
  fence [R]            place the geofence at your position (or the center)
  fence-at LAT,LON [R] place the geofence at a coordinate
  click LAT,LON        click the map (moves the geofence)
  start | stop         start or stop position tracking
  weather              current weather at your position (or the center)
  status               show the session state
  map                  describe what the map shows
  help                 this text
  quit                 leave the session";

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "search" => SessionCommand::Search(rest.to_string()),
            "results" => SessionCommand::Results,
            "pick" => SessionCommand::Pick(index(&args)?),
            "from" | "to" => SessionCommand::Endpoint {
                role: word.parse()?,
                target: target(&args)?,
            },
            "route" => SessionCommand::Route,
            "center" => {
                let role = args.first().ok_or("Usage: center from|to")?;
                SessionCommand::Center(role.parse()?)
            }
            "poi" => poi(&args)?,
            "pickpoi" => SessionCommand::PickPoi(index(&args)?),
            "fence" => SessionCommand::Fence(args.first().map(|r| radius(r)).transpose()?),
            "fence-at" => SessionCommand::FenceAt {
                center: coordinate(args.first().ok_or("Usage: fence-at LAT,LON [R]")?)?,
                radius_m: args.get(1).map(|r| radius(r)).transpose()?,
            },
            "click" => SessionCommand::Click(coordinate(
                args.first().ok_or("Usage: click LAT,LON")?,
            )?),
            "start" => SessionCommand::Start,
            "stop" => SessionCommand::Stop,
            "weather" => SessionCommand::Weather,
            "status" => SessionCommand::Status,
            "map" => SessionCommand::Map,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => {
                return Err(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    other
                ))
            }
        };

        Ok(command)
    }
}

/// 1-based list position.
fn index(args: &[&str]) -> Result<usize, String> {
    let text = args.first().ok_or("Missing result number")?;
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("'{}' is not a result number", text)),
    }
}

fn target(args: &[&str]) -> Result<Target, String> {
    let text = args.first().ok_or("Missing result number or LAT,LON")?;
    if text.contains(',') {
        coordinate(text).map(Target::At)
    } else {
        index(args).map(Target::Result)
    }
}

fn coordinate(text: &str) -> Result<Coordinate, String> {
    text.parse().map_err(|e: mapfence::coord::CoordError| e.to_string())
}

fn radius(text: &str) -> Result<f64, String> {
    match text.parse::<f64>() {
        Ok(r) if r.is_finite() && r > 0.0 => Ok(r),
        _ => Err(format!("'{}' is not a radius in meters", text)),
    }
}

/// `poi KEYWORD... [R]`: a trailing integer is the radius.
fn poi(args: &[&str]) -> Result<SessionCommand, String> {
    let (radius_m, words) = match args.split_last() {
        Some((last, rest)) if !rest.is_empty() => match last.parse::<u32>() {
            Ok(r) if r > 0 => (Some(r), rest),
            _ => (None, args),
        },
        _ => (None, args),
    };

    if words.is_empty() {
        return Err("Usage: poi KEYWORD [R]".to_string());
    }

    Ok(SessionCommand::Poi {
        keyword: words.join(" "),
        radius_m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> SessionCommand {
        line.parse().unwrap()
    }

    #[test]
    fn test_search_keeps_full_text() {
        assert_eq!(
            parse("search  India Gate, New Delhi "),
            SessionCommand::Search("India Gate, New Delhi".into())
        );
        assert_eq!(parse("search"), SessionCommand::Search(String::new()));
    }

    #[test]
    fn test_endpoints_by_index_or_coordinate() {
        assert_eq!(
            parse("from 2"),
            SessionCommand::Endpoint {
                role: RouteRole::From,
                target: Target::Result(2)
            }
        );
        assert_eq!(
            parse("TO 28.5,77.1"),
            SessionCommand::Endpoint {
                role: RouteRole::To,
                target: Target::At(Coordinate::new(28.5, 77.1).unwrap())
            }
        );
        assert!("from 0".parse::<SessionCommand>().is_err());
        assert!("to 95,0".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_poi_trailing_radius() {
        assert_eq!(
            parse("poi fast food 500"),
            SessionCommand::Poi {
                keyword: "fast food".into(),
                radius_m: Some(500)
            }
        );
        assert_eq!(
            parse("poi cafe"),
            SessionCommand::Poi {
                keyword: "cafe".into(),
                radius_m: None
            }
        );
        // A lone number is a keyword, not a radius
        assert_eq!(
            parse("poi 24"),
            SessionCommand::Poi {
                keyword: "24".into(),
                radius_m: None
            }
        );
        assert!("poi".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_fence_commands() {
        assert_eq!(parse("fence"), SessionCommand::Fence(None));
        assert_eq!(parse("fence 250"), SessionCommand::Fence(Some(250.0)));
        assert_eq!(
            parse("fence-at 28.6139,77.2090 150"),
            SessionCommand::FenceAt {
                center: Coordinate::new(28.6139, 77.2090).unwrap(),
                radius_m: Some(150.0)
            }
        );
        assert!("fence -5".parse::<SessionCommand>().is_err());
        assert!("fence-at".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_center_role() {
        assert_eq!(parse("center to"), SessionCommand::Center(RouteRole::To));
        assert!("center middle".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_unknown_command_mentions_help() {
        let err = "teleport 1".parse::<SessionCommand>().unwrap_err();
        assert!(err.contains("teleport"));
        assert!(err.contains("help"));
    }

    #[test]
    fn test_quit_aliases() {
        for line in ["quit", "exit", "q"] {
            assert_eq!(parse(line), SessionCommand::Quit);
        }
    }
}

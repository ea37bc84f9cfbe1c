//! Route command handler for planning multi-stop journeys.

use std::path::Path;

use anyhow::{Context, Result};

use citynav_lib::{
    find_path, DataSource, Error as RouteError, RouteAlgorithm, RouteRequest, RouteSummary,
};

use crate::commands::load_snapshot;
use crate::output::{emit, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting city name.
    pub from: String,
    /// Final destination.
    pub to: String,
    /// Intermediate stops visited in order before `to`.
    pub via: Vec<String>,
    /// Search engine used for every leg.
    pub algorithm: RouteAlgorithm,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let waypoints = self.via.iter().chain(std::iter::once(&self.to)).cloned();
        RouteRequest::new(self.algorithm, self.from.clone(), waypoints)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    target_path: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let dataset = load_snapshot(target_path)?;
    let rendered = render_route(&dataset, format, args)?;
    emit(&rendered);
    Ok(())
}

/// Plan the requested route against `source` and render it.
pub fn render_route<S: DataSource + ?Sized>(
    source: &S,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<String> {
    let request = args.to_request();
    let plan = find_path(source, &request).map_err(handle_route_failure)?;

    RouteSummary::from_plan(&plan)
        .render(format.render_mode())
        .context("failed to render route summary")
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownCity { name, suggestions } => {
            anyhow::anyhow!(format_unknown_city_message(&name, &suggestions))
        }
        RouteError::NoPathFound { start, goal } => {
            anyhow::anyhow!(format_route_not_found_message(&start, &goal))
        }
        other => anyhow::Error::new(other),
    }
}

pub(crate) fn format_unknown_city_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown city '{}'.", name);
    match suggestions {
        [] => {}
        [only] => {
            message.push_str(&format!(" Did you mean '{only}'?"));
        }
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_route_not_found_message(start: &str, goal: &str) -> String {
    format!(
        "No route found between {} and {}. The cities are not connected by any chain of roads.",
        start, goal
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use citynav_lib::{CityRecord, Dataset, DistanceRecord};

    fn dataset() -> Dataset {
        let city = |name: &str, longitude: f64| CityRecord {
            name: name.to_string(),
            latitude: 45.0,
            longitude,
        };
        Dataset::new(
            vec![city("Alba", 24.0), city("Brad", 24.1), city("Cluj", 24.2), city("Deva", 30.0)],
            vec![
                DistanceRecord {
                    from: "Alba".into(),
                    to: "Brad".into(),
                    km: 10.0,
                },
                DistanceRecord {
                    from: "Brad".into(),
                    to: "Cluj".into(),
                    km: 10.0,
                },
            ],
        )
    }

    fn args(from: &str, via: &[&str], to: &str) -> RouteCommandArgs {
        RouteCommandArgs {
            from: from.to_string(),
            to: to.to_string(),
            via: via.iter().map(|s| s.to_string()).collect(),
            algorithm: RouteAlgorithm::AStar,
        }
    }

    #[test]
    fn via_stops_precede_destination() {
        let request = args("Alba", &["Brad"], "Cluj").to_request();
        assert_eq!(request.start, "Alba");
        assert_eq!(request.waypoints, vec!["Brad", "Cluj"]);
    }

    #[test]
    fn renders_text_summary() {
        let text = render_route(&dataset(), OutputFormat::Text, &args("Alba", &[], "Cluj")).unwrap();
        assert!(text.starts_with("From Alba to Cluj -> total cost = 20.0 km"));
    }

    #[test]
    fn unknown_city_message_is_friendly() {
        let err = render_route(&dataset(), OutputFormat::Text, &args("Alba", &[], "Clui"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Unknown city 'Clui'."), "{message}");
        assert!(message.contains("Did you mean 'Cluj'?"), "{message}");
    }

    #[test]
    fn disconnected_cities_are_explained() {
        let err = render_route(&dataset(), OutputFormat::Text, &args("Alba", &[], "Deva"))
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("No route found between Alba and Deva."));
    }

    #[test]
    fn suggestion_lists_are_joined() {
        let message =
            format_unknown_city_message("X", &["Alba".to_string(), "Brad".to_string()]);
        assert_eq!(message, "Unknown city 'X'. Did you mean one of: 'Alba', 'Brad'?");
    }
}

//! Multi-waypoint route planning.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - the three interchangeable search engines
//! - [`RouteRequest`] - a start city plus an ordered list of waypoints
//! - [`RoutePlan`] - the stitched result with per-leg costs
//! - [`plan_route`] - chain leg searches over an already built graph
//! - [`find_path`] - build a graph from a data source and plan on it
//!
//! # Example
//!
//! ```ignore
//! use citynav_lib::{find_path, load_dataset, RouteAlgorithm, RouteRequest};
//!
//! let dataset = load_dataset("docs/fixtures/romania.json".as_ref())?;
//! let request = RouteRequest::new(RouteAlgorithm::NbaStar, "Arad", ["Sibiu", "Bucharest"]);
//! let plan = find_path(&dataset, &request)?;
//! println!("{} km over {} legs", plan.total_cost, plan.legs.len());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::dataset::DataSource;
use crate::error::{Error, Result};
use crate::graph::{build_graph, Graph, NodeId};
use crate::search::{a_star, ida_star, nba_star, SearchOutcome};

/// Supported search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum RouteAlgorithm {
    /// Single-directional best-first search.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Iterative-deepening bounded depth-first search.
    #[serde(rename = "ida-star")]
    IdaStar,
    /// Bidirectional best-first search.
    #[serde(rename = "nba-star")]
    NbaStar,
}

impl RouteAlgorithm {
    /// Every engine, in declaration order.
    pub const ALL: [RouteAlgorithm; 3] = [
        RouteAlgorithm::AStar,
        RouteAlgorithm::IdaStar,
        RouteAlgorithm::NbaStar,
    ];

    /// Run this engine for a single leg.
    pub fn search(self, graph: &Graph, start: NodeId, goal: NodeId) -> SearchOutcome {
        match self {
            RouteAlgorithm::AStar => a_star::search(graph, start, goal),
            RouteAlgorithm::IdaStar => ida_star::search(graph, start, goal),
            RouteAlgorithm::NbaStar => nba_star::search(graph, start, goal),
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::IdaStar => "ida-star",
            RouteAlgorithm::NbaStar => "nba-star",
        };
        f.write_str(value)
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}'; expected a-star, ida-star or nba-star",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for RouteAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace('_', "-").as_str() {
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            "ida-star" | "idastar" | "ida*" => Ok(RouteAlgorithm::IdaStar),
            "nba-star" | "nbastar" | "nba*" => Ok(RouteAlgorithm::NbaStar),
            _ => Err(ParseAlgorithmError(value.to_string())),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub algorithm: RouteAlgorithm,
    pub start: String,
    /// Cities visited in order after `start`; the last one is the destination.
    pub waypoints: Vec<String>,
}

impl RouteRequest {
    pub fn new<I, S>(algorithm: RouteAlgorithm, start: impl Into<String>, waypoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            algorithm,
            start: start.into(),
            waypoints: waypoints.into_iter().map(Into::into).collect(),
        }
    }

    /// Convenience constructor for a single-leg A* route.
    pub fn a_star(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self::new(RouteAlgorithm::AStar, start, [goal.into()])
    }

    /// Final destination, if any waypoint was given.
    pub fn goal(&self) -> Option<&str> {
        self.waypoints.last().map(String::as_str)
    }
}

/// City visited by a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Cost accumulated from the start of the route up to this stop.
    pub cost: f64,
}

/// One source-to-destination segment of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub cost: f64,
    pub hops: usize,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub stops: Vec<RouteStop>,
    pub legs: Vec<RouteLeg>,
    pub total_cost: f64,
}

impl RoutePlan {
    /// Number of roads travelled over the whole route.
    pub fn hop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Names of the visited cities in order.
    pub fn stop_names(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| stop.name.as_str()).collect()
    }
}

/// Chain one leg search per consecutive waypoint pair over `graph`.
///
/// The shared junction city between two legs appears once in the stitched
/// route and leg costs are summed. The first leg that cannot be completed
/// aborts the whole request with [`Error::NoPathFound`] naming that leg.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    if request.waypoints.is_empty() {
        return Err(Error::MissingDestination);
    }

    let mut cities = Vec::with_capacity(request.waypoints.len() + 1);
    cities.push(graph.resolve_city(&request.start)?);
    for name in &request.waypoints {
        cities.push(graph.resolve_city(name)?);
    }

    let mut stops: Vec<RouteStop> = Vec::new();
    let mut legs = Vec::with_capacity(cities.len() - 1);
    let mut total_cost = 0.0;

    for pair in cities.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let from_name = graph.node(from).key.as_str();
        let to_name = graph.node(to).key.as_str();

        let outcome = request.algorithm.search(graph, from, to);
        debug!(
            algorithm = %request.algorithm,
            from = from_name,
            to = to_name,
            expanded = outcome.stats.expanded,
            iterations = outcome.stats.iterations,
            "leg search finished"
        );
        let path = outcome
            .path
            .ok_or_else(|| Error::no_path(from_name, to_name))?;

        // The junction city is already the last stop of the previous leg.
        let skip = usize::from(!stops.is_empty());
        let mut running = total_cost;
        let mut previous: Option<NodeId> = None;
        for (position, &node) in path.nodes.iter().enumerate() {
            if let Some(prev) = previous {
                running += graph.edge_weight(prev, node).unwrap_or(0.0);
            }
            previous = Some(node);
            if position < skip {
                continue;
            }
            let city = graph.node(node);
            stops.push(RouteStop {
                name: city.key.clone(),
                latitude: city.coordinates.latitude,
                longitude: city.coordinates.longitude,
                cost: running,
            });
        }

        legs.push(RouteLeg {
            from: from_name.to_string(),
            to: to_name.to_string(),
            cost: path.cost,
            hops: path.hop_count(),
        });
        total_cost += path.cost;
    }

    info!(
        algorithm = %request.algorithm,
        start = %request.start,
        legs = legs.len(),
        total_cost,
        "route planned"
    );

    Ok(RoutePlan {
        algorithm: request.algorithm,
        stops,
        legs,
        total_cost,
    })
}

/// Build a graph from the collaborator snapshot and plan `request` on it.
///
/// The graph only lives for the duration of this call.
pub fn find_path<S: DataSource + ?Sized>(source: &S, request: &RouteRequest) -> Result<RoutePlan> {
    let graph = build_graph(source)?;
    plan_route(&graph, request)
}

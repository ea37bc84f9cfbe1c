//! citynav library entry points.
//!
//! This crate loads a snapshot of cities and road distances, builds an
//! in-memory routing graph per request, and runs one of three heuristic
//! search engines (A*, IDA*, NBA*) over it. Multi-stop routes are planned by
//! chaining one search per consecutive pair of waypoints. Higher-level
//! consumers such as the CLI should only depend on the items exported here.

pub mod dataset;
pub mod error;
pub mod frontier;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;

pub use dataset::{
    default_dataset_path, load_dataset, resolve_dataset_path, CityRecord, DataSource, Dataset,
    DistanceRecord, DATASET_ENV_VAR,
};
pub use error::{Error, Result};
pub use frontier::{Priority, PriorityFrontier};
pub use geo::{haversine_distance, Coordinates, DistanceUnit};
pub use graph::{build_graph, Edge, Graph, Node, NodeId};
pub use output::{DistanceSummary, RouteRenderMode, RouteSummary};
pub use path::{Path, PathArena, PathId};
pub use routing::{
    find_path, plan_route, ParseAlgorithmError, RouteAlgorithm, RouteLeg, RoutePlan,
    RouteRequest, RouteStop,
};
pub use search::{
    find_route_a_star, find_route_ida_star, find_route_nba_star, SearchOutcome, SearchStats,
};

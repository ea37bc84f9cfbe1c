//! Direct distance between two cities.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use citynav_lib::{
    build_graph, haversine_distance, DataSource, DistanceSummary, DistanceUnit,
    Error as RouteError,
};

use crate::commands::load_snapshot;
use crate::commands::route::format_unknown_city_message;
use crate::output::{emit, OutputFormat};

/// Unit accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UnitArg {
    #[default]
    Km,
    Mi,
}

impl From<UnitArg> for DistanceUnit {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::Km => DistanceUnit::Kilometers,
            UnitArg::Mi => DistanceUnit::Miles,
        }
    }
}

/// Arguments for the distance command.
#[derive(Debug, Clone)]
pub struct DistanceCommandArgs {
    pub from: String,
    pub to: String,
    pub unit: UnitArg,
}

pub fn handle_distance_command(
    target_path: Option<&Path>,
    format: OutputFormat,
    args: &DistanceCommandArgs,
) -> Result<()> {
    let dataset = load_snapshot(target_path)?;
    emit(&render_distance(&dataset, format, args)?);
    Ok(())
}

/// Look up the road joining two cities and the great-circle distance between them.
pub fn render_distance<S: DataSource + ?Sized>(
    source: &S,
    format: OutputFormat,
    args: &DistanceCommandArgs,
) -> Result<String> {
    let graph = build_graph(source).context("failed to build the road graph")?;
    let from = graph.resolve_city(&args.from).map_err(friendly)?;
    let to = graph.resolve_city(&args.to).map_err(friendly)?;

    let unit = DistanceUnit::from(args.unit);
    let (a, b) = (graph.node(from), graph.node(to));
    let summary = DistanceSummary {
        from: a.key.clone(),
        to: b.key.clone(),
        unit,
        road: graph
            .edge_weight(from, to)
            .map(|km| unit.from_kilometers(km)),
        great_circle: haversine_distance(a.coordinates, b.coordinates, unit),
    };

    summary
        .render(format.render_mode())
        .context("failed to render distance summary")
}

fn friendly(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownCity { name, suggestions } => {
            anyhow::anyhow!(format_unknown_city_message(&name, &suggestions))
        }
        other => anyhow::Error::new(other),
    }
}

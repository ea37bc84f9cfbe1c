// Each module handles one CLI subcommand; main.rs only parses and dispatches.

pub mod cities;
pub mod distance;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use citynav_lib::{load_dataset, resolve_dataset_path, Dataset};
use tracing::debug;

/// Resolve and load the dataset selected by `--data`, `CITYNAV_DATASET`, or
/// the platform default.
pub fn load_snapshot(target: Option<&Path>) -> Result<Dataset> {
    let path = resolve_dataset_path(target).context("failed to resolve the dataset location")?;
    debug!(path = %path.display(), "loading dataset");
    load_dataset(&path).with_context(|| format!("failed to load dataset from {}", path.display()))
}

//! Lists every city known to the dataset.

use std::path::Path;

use anyhow::{Context, Result};
use citynav_lib::Dataset;

use crate::commands::load_snapshot;
use crate::output::{emit, OutputFormat};

pub fn handle_cities_command(target_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let dataset = load_snapshot(target_path)?;
    emit(&render_cities(&dataset, format)?);
    Ok(())
}

/// City names in alphabetical order, one per line or as a JSON array.
pub fn render_cities(dataset: &Dataset, format: OutputFormat) -> Result<String> {
    let names = dataset.city_names();
    match format {
        OutputFormat::Text => Ok(names.join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&names).context("failed to serialise city list")
        }
    }
}

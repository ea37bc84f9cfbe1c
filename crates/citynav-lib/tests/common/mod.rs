//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use citynav_lib::{build_graph, load_dataset, Dataset, Graph};

/// Path to the fixtures directory shared with the CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn romania_path() -> PathBuf {
    fixtures_dir().join("romania.json")
}

#[allow(dead_code)]
pub fn romania() -> Dataset {
    load_dataset(&romania_path()).expect("fixture loads")
}

#[allow(dead_code)]
pub fn romania_graph() -> Graph {
    build_graph(&romania()).expect("fixture builds")
}

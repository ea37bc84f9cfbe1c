use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the citynav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a start, destination, or waypoint is absent from the graph.
    #[error("unknown city name: {name}{}", format_suggestions(.suggestions))]
    UnknownCity {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when an edge references a node key that was never added.
    #[error("unknown node key: {key}")]
    UnknownNode { key: String },

    /// Raised when a node key is added to the graph twice.
    #[error("duplicate node key: {key}")]
    DuplicateKey { key: String },

    /// Raised when no route could be found between two cities.
    #[error("no route found between {start} and {goal}")]
    NoPathFound { start: String, goal: String },

    /// Raised when a route request carries no destination at all.
    #[error("route request needs at least one destination")]
    MissingDestination,

    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when the dataset file extension does not match a known format.
    #[error("unsupported dataset format at {path}; expected .json, .db, .sqlite or .sqlite3")]
    UnsupportedDataset { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    /// Build a [`Error::NoPathFound`] for the given leg endpoints.
    pub fn no_path(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Error::NoPathFound {
            start: start.into(),
            goal: goal.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

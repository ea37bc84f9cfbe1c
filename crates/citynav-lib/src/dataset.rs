use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Default filename for the dataset inside the platform data directory.
const DATASET_FILENAME: &str = "cities.json";

/// Environment variable that overrides the dataset location.
pub const DATASET_ENV_VAR: &str = "CITYNAV_DATASET";

/// A city as supplied by the data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
}

/// An undirected road between two cities, in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub from: String,
    pub to: String,
    pub km: f64,
}

/// Read-only snapshot of cities and distances.
pub trait DataSource {
    fn list_cities(&self) -> Result<Vec<CityRecord>>;
    fn list_distances(&self) -> Result<Vec<DistanceRecord>>;
}

/// Owned in-memory snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub cities: Vec<CityRecord>,
    #[serde(default)]
    pub distances: Vec<DistanceRecord>,
}

impl Dataset {
    pub fn new(cities: Vec<CityRecord>, distances: Vec<DistanceRecord>) -> Self {
        Self { cities, distances }
    }

    /// Parse a JSON document of the form `{"cities": [...], "distances": [...]}`.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            cities = dataset.cities.len(),
            distances = dataset.distances.len(),
            "loaded json dataset"
        );
        Ok(dataset)
    }

    /// Read the `Cities` and `Distances` tables of a SQLite snapshot.
    pub fn from_sqlite_path(path: &Path) -> Result<Self> {
        let connection = Connection::open(path)?;

        let mut statement =
            connection.prepare("SELECT name, latitude, longitude FROM Cities ORDER BY rowid")?;
        let cities = statement
            .query_map([], |row| {
                Ok(CityRecord {
                    name: row.get(0)?,
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut statement = connection
            .prepare("SELECT name_start, name_stop, distance FROM Distances ORDER BY rowid")?;
        let distances = statement
            .query_map([], |row| {
                Ok(DistanceRecord {
                    from: row.get(0)?,
                    to: row.get(1)?,
                    km: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(
            path = %path.display(),
            cities = cities.len(),
            distances = distances.len(),
            "loaded sqlite dataset"
        );
        Ok(Self { cities, distances })
    }

    /// City names sorted alphabetically.
    pub fn city_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl DataSource for Dataset {
    fn list_cities(&self) -> Result<Vec<CityRecord>> {
        Ok(self.cities.clone())
    }

    fn list_distances(&self) -> Result<Vec<DistanceRecord>> {
        Ok(self.distances.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatasetFormat {
    Json,
    Sqlite,
}

impl DatasetFormat {
    fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(DatasetFormat::Json),
            "db" | "sqlite" | "sqlite3" => Some(DatasetFormat::Sqlite),
            _ => None,
        }
    }
}

/// Load a snapshot, picking the adapter from the file extension.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    match DatasetFormat::detect(path) {
        Some(DatasetFormat::Json) => Dataset::from_json_path(path),
        Some(DatasetFormat::Sqlite) => Dataset::from_sqlite_path(path),
        None => Err(Error::UnsupportedDataset {
            path: path.to_path_buf(),
        }),
    }
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "citynav", "citynav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Resolve which dataset file to read.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `CITYNAV_DATASET` environment variable.
/// 3. Platform-specific project data directory.
///
/// A directory is completed with the default `cities.json` filename.
pub fn resolve_dataset_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_dataset_path(explicit));
    }

    if let Some(env_path) = env::var_os(DATASET_ENV_VAR) {
        return Ok(canonical_dataset_path(Path::new(&env_path)));
    }

    let default = default_dataset_path()?;
    info!(path = %default.display(), "using default dataset location");
    Ok(default)
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join(DATASET_FILENAME);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_accepts_short_coordinate_aliases() {
        let dataset = Dataset::from_json_str(
            r#"{"cities":[{"name":"Arad","lat":46.18,"lon":21.31}],"distances":[]}"#,
        )
        .unwrap();
        assert_eq!(dataset.cities[0].latitude, 46.18);
        assert_eq!(dataset.cities[0].longitude, 21.31);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let dataset = Dataset::from_json_str("{}").unwrap();
        assert!(dataset.cities.is_empty());
        assert!(dataset.distances.is_empty());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DatasetFormat::detect(Path::new("a/cities.JSON")),
            Some(DatasetFormat::Json)
        );
        assert_eq!(
            DatasetFormat::detect(Path::new("cities.sqlite3")),
            Some(DatasetFormat::Sqlite)
        );
        assert_eq!(DatasetFormat::detect(Path::new("cities.csv")), None);
        assert_eq!(DatasetFormat::detect(Path::new("cities")), None);
    }

    #[test]
    fn explicit_target_wins() {
        let resolved = resolve_dataset_path(Some(Path::new("/tmp/custom.json"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn default_path_ends_with_dataset_filename() {
        if let Ok(path) = default_dataset_path() {
            assert!(path.ends_with(DATASET_FILENAME));
        }
    }

    #[test]
    fn city_names_are_sorted() {
        let dataset = Dataset::new(
            vec![
                CityRecord {
                    name: "Sibiu".into(),
                    latitude: 45.8,
                    longitude: 24.1,
                },
                CityRecord {
                    name: "Arad".into(),
                    latitude: 46.2,
                    longitude: 21.3,
                },
            ],
            Vec::new(),
        );
        assert_eq!(dataset.city_names(), vec!["Arad", "Sibiu"]);
    }
}

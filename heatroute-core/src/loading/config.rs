use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Error;
use crate::model::route_model::{DEFAULT_DRIVING_SPEED_KMH, DEFAULT_NEAREST_SHELTERS};

/// Default population property of vulnerability polygons
pub const DEFAULT_POPULATION_PROPERTY: &str = "Pop20_75";

/// Input files and tunables of a route model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlannerConfig {
    /// `GeoJSON` polygon or closed ring of the operating area
    pub boundary_path: PathBuf,
    /// CSV with `Name, Capacity, latitude, longitude, Type` columns
    pub shelters_path: PathBuf,
    /// `GeoJSON` parks and other shaded areas
    pub green_space_path: PathBuf,
    /// `GeoJSON` population or vulnerability polygons
    pub vulnerability_path: PathBuf,
    /// `GeoJSON` edges of the pedestrian network
    pub walk_network_path: PathBuf,
    /// `GeoJSON` edges of the road network
    pub drive_network_path: PathBuf,
    #[serde(default = "default_driving_speed")]
    pub driving_speed_kmh: f64,
    #[serde(default = "default_nearest_shelters")]
    pub nearest_shelters: usize,
    #[serde(default = "default_population_property")]
    pub population_property: String,
}

fn default_driving_speed() -> f64 {
    DEFAULT_DRIVING_SPEED_KMH
}

fn default_nearest_shelters() -> usize {
    DEFAULT_NEAREST_SHELTERS
}

fn default_population_property() -> String {
    DEFAULT_POPULATION_PROPERTY.to_string()
}

impl PlannerConfig {
    /// Reads a JSON config; relative paths resolve against the config's directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_against(base))
    }

    /// Parses a JSON config, leaving paths untouched
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or missing paths
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn resolve_against(mut self, base: &Path) -> Self {
        for path in [
            &mut self.boundary_path,
            &mut self.shelters_path,
            &mut self.green_space_path,
            &mut self.vulnerability_path,
            &mut self.walk_network_path,
            &mut self.drive_network_path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

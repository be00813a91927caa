//! Heat scenarios and the lookup tables they drive

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Categorical heat-risk bucket produced by a [`ScenarioClassifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scenario {
    Low,
    Moderate,
    High,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Low, Scenario::Moderate, Scenario::High];

    /// Base heat-hazard magnitude before green-space discounting
    pub fn base_hazard(self) -> f64 {
        match self {
            Scenario::Low => 20.0,
            Scenario::Moderate => 50.0,
            Scenario::High => 80.0,
        }
    }

    /// Walking speed in km/h
    pub fn walking_speed_kmh(self) -> f64 {
        match self {
            Scenario::Low => 5.0,
            Scenario::Moderate => 4.0,
            Scenario::High => 3.0,
        }
    }

    /// Walking speed in m/s
    pub fn walking_speed_ms(self) -> f64 {
        self.walking_speed_kmh() / 3.6
    }

    /// Liters of water needed per walked kilometer
    pub fn water_per_km(self) -> f64 {
        match self {
            Scenario::Low => 0.2,
            Scenario::Moderate => 0.4,
            Scenario::High => 0.6,
        }
    }

    /// Water needed in liters to walk `distance` meters
    pub fn water_needed(self, distance: f64) -> f64 {
        self.water_per_km() * (distance / 1000.0)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Low => "Low",
            Scenario::Moderate => "Moderate",
            Scenario::High => "High",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Scenario::Low),
            "moderate" => Ok(Scenario::Moderate),
            "high" => Ok(Scenario::High),
            other => Err(Error::ScenarioUnavailable(format!(
                "unknown scenario label '{other}'"
            ))),
        }
    }
}

/// Weather observation fed to the scenario classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherFeatures {
    pub total_precip: f64,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    pub sunshine: f64,
    pub solar_rad: f64,
    pub avg_cloud: f64,
}

/// Maps weather features to a heat scenario.
///
/// The planner treats implementations as opaque: a trained model, a remote
/// service or a fixed value all fit behind this trait.
pub trait ScenarioClassifier {
    /// # Errors
    ///
    /// Returns [`Error::ScenarioUnavailable`] when no scenario can be produced
    fn classify(&self, features: &WeatherFeatures) -> Result<Scenario, Error>;
}

/// Classifier that always answers with the same scenario
#[derive(Debug, Clone, Copy)]
pub struct FixedScenario(pub Scenario);

impl ScenarioClassifier for FixedScenario {
    fn classify(&self, _features: &WeatherFeatures) -> Result<Scenario, Error> {
        Ok(self.0)
    }
}

impl<F> ScenarioClassifier for F
where
    F: Fn(&WeatherFeatures) -> Result<Scenario, Error>,
{
    fn classify(&self, features: &WeatherFeatures) -> Result<Scenario, Error> {
        self(features)
    }
}

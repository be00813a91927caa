//! Population vulnerability levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Population sensitivity bucket. Variant order is the severity order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum VulnerabilityLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl VulnerabilityLevel {
    pub const ALL: [VulnerabilityLevel; 3] = [
        VulnerabilityLevel::Low,
        VulnerabilityLevel::Medium,
        VulnerabilityLevel::High,
    ];

    /// Canonical cost multiplier for the level
    pub fn factor(self) -> f64 {
        match self {
            VulnerabilityLevel::Low => 1.0,
            VulnerabilityLevel::Medium => 1.5,
            VulnerabilityLevel::High => 2.0,
        }
    }

    /// Classify an elderly population count
    pub fn from_population(count: f64) -> Self {
        if count <= 5.0 {
            VulnerabilityLevel::Low
        } else if count <= 15.0 {
            VulnerabilityLevel::Medium
        } else {
            VulnerabilityLevel::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VulnerabilityLevel::Low => "Low",
            VulnerabilityLevel::Medium => "Medium",
            VulnerabilityLevel::High => "High",
        }
    }
}

impl fmt::Display for VulnerabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VulnerabilityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(VulnerabilityLevel::Low),
            "medium" => Ok(VulnerabilityLevel::Medium),
            "high" => Ok(VulnerabilityLevel::High),
            other => Err(Error::DataLoad(format!(
                "unknown vulnerability level '{other}'"
            ))),
        }
    }
}

//! Evacuation shelters and nearest-shelter lookup

use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use serde::Serialize;

use crate::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shelter {
    pub name: String,
    pub capacity: u32,
    /// Shelter location (lon, lat)
    pub geometry: Point<f64>,
    pub category: String,
}

/// Shelter with its great-circle distance from a query point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelterCandidate {
    pub shelter: Shelter,
    /// Meters
    pub distance: f64,
}

/// Ordered, read-only list of shelters
#[derive(Debug, Clone, Default)]
pub struct ShelterRegistry {
    shelters: Vec<Shelter>,
}

impl ShelterRegistry {
    pub fn new(shelters: Vec<Shelter>) -> Self {
        Self { shelters }
    }

    pub fn len(&self) -> usize {
        self.shelters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelters.is_empty()
    }

    pub fn shelters(&self) -> &[Shelter] {
        &self.shelters
    }

    /// Up to `k` shelters closest to `origin`, nearest first
    pub fn nearest(&self, origin: &Point<f64>, k: usize) -> Vec<ShelterCandidate> {
        self.shelters
            .iter()
            .map(|shelter| ShelterCandidate {
                distance: Haversine.distance(*origin, shelter.geometry),
                shelter: shelter.clone(),
            })
            .sorted_by(|a, b| a.distance.total_cmp(&b.distance))
            .take(k)
            .collect()
    }
}

/// Pick a candidate by zero-based index
///
/// # Errors
///
/// Returns [`Error::InvalidSelection`] if `index` is out of range
pub fn select_shelter(candidates: &[ShelterCandidate], index: usize) -> Result<&Shelter, Error> {
    candidates
        .get(index)
        .map(|candidate| &candidate.shelter)
        .ok_or(Error::InvalidSelection {
            index,
            available: candidates.len(),
        })
}

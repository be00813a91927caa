//! Read-only reference data shared by every planning run

use geo::Point;

use super::{
    AreaBoundary, HazardZones, RoadNetwork, ShelterCandidate, ShelterRegistry, VulnerabilityZones,
};

/// Default comparison driving speed in km/h
pub const DEFAULT_DRIVING_SPEED_KMH: f64 = 30.0;
/// Default number of shelters offered to the user
pub const DEFAULT_NEAREST_SHELTERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteModelMeta {
    pub driving_speed_kmh: f64,
    pub nearest_shelters: usize,
}

impl Default for RouteModelMeta {
    fn default() -> Self {
        Self {
            driving_speed_kmh: DEFAULT_DRIVING_SPEED_KMH,
            nearest_shelters: DEFAULT_NEAREST_SHELTERS,
        }
    }
}

/// Boundary, street networks, overlays and shelters of one district.
///
/// The model is never mutated by planning; per-run edge attributes live in
/// [`crate::algo::EdgeAnnotations`].
#[derive(Debug, Clone)]
pub struct RouteModel {
    pub boundary: AreaBoundary,
    pub walk_network: RoadNetwork,
    pub drive_network: RoadNetwork,
    pub hazard_zones: HazardZones,
    pub vulnerability_zones: VulnerabilityZones,
    pub shelters: ShelterRegistry,
    pub meta: RouteModelMeta,
}

impl RouteModel {
    /// Shelters closest to `origin`, limited by `meta.nearest_shelters`
    pub fn nearest_shelters(&self, origin: &Point<f64>) -> Vec<ShelterCandidate> {
        self.shelters.nearest(origin, self.meta.nearest_shelters)
    }

    pub fn summary(&self) -> String {
        format!(
            "RouteModel with {} walking edges, {} driving edges, {} green zones, \
             {} vulnerability zones and {} shelters",
            self.walk_network.edge_count(),
            self.drive_network.edge_count(),
            self.hazard_zones.len(),
            self.vulnerability_zones.len(),
            self.shelters.len()
        )
    }
}

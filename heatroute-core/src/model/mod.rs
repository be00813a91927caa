//! Data model for heat-aware evacuation routing
//!
//! Street networks, hazard and vulnerability overlays, shelters and the
//! records produced by planning.

pub mod boundary;
pub mod plan;
pub mod route_model;
pub mod scenario;
pub mod shelter;
pub mod streets;
pub mod vulnerability;
pub mod zones;

pub use boundary::AreaBoundary;
pub use plan::{LevelSummary, RiskComparison, RoutePath, RoutePlan, VulnerabilityHistogram};
pub use route_model::{RouteModel, RouteModelMeta};
pub use scenario::{FixedScenario, Scenario, ScenarioClassifier, WeatherFeatures};
pub use shelter::{Shelter, ShelterCandidate, ShelterRegistry, select_shelter};
pub use streets::{
    EdgeKey, IndexedPoint, NetworkFingerprint, RoadNetwork, RoadNetworkBuilder, StreetEdge,
    StreetNode,
};
pub use vulnerability::VulnerabilityLevel;
pub use zones::{HazardZones, VulnerabilityZone, VulnerabilityZones};

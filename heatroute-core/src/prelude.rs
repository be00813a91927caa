pub use crate::Error;

// Loading
pub use crate::loading::{PlannerConfig, create_route_model, validate_config};

// Model
pub use crate::model::{
    AreaBoundary, FixedScenario, HazardZones, RiskComparison, RoadNetwork, RouteModel, RoutePath,
    RoutePlan, Scenario, ScenarioClassifier, Shelter, ShelterCandidate, ShelterRegistry,
    VulnerabilityLevel, VulnerabilityZone, VulnerabilityZones, WeatherFeatures, select_shelter,
};

// Per-run annotation and planning
pub use crate::algo::{EdgeAnnotation, EdgeAnnotations, annotate};
pub use crate::routing::{plan_route, plan_route_with_classifier, plan_with_annotations};

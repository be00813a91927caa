//! Per-run edge annotation and path aggregation

pub mod cost;
pub mod overlay;
pub mod risk;
pub mod zonation;

pub use cost::{EdgeAnnotation, EdgeAnnotations, annotate, edge_cost};
pub use overlay::{EdgeVulnerability, edge_vulnerability, vulnerability_values};
pub use risk::{PathMetrics, compare_risk, path_distance, path_metrics, path_risk, travel_minutes};
pub use zonation::{GREEN_SPACE_DISCOUNT, edge_hazard, hazard_values};

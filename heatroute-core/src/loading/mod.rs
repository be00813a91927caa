//! This module is responsible for loading boundary, street network, overlay
//! and shelter data and building a route model.

mod builder;
mod config;
pub mod layers;
pub mod network;
pub mod shelters;

pub use builder::{create_route_model, validate_config};
pub use config::{DEFAULT_POPULATION_PROPERTY, PlannerConfig};
pub use layers::{load_boundary, load_polygons, load_vulnerability_zones};
pub use network::{load_road_network, road_network_from_str};
pub use shelters::{load_shelters, shelters_from_reader};

use geo::{ConvexHull, Intersects, MultiPoint};
use log::info;

use super::config::PlannerConfig;
use super::layers::{load_boundary, load_polygons, load_vulnerability_zones};
use super::network::load_road_network;
use super::shelters::load_shelters;
use crate::Error;
use crate::model::{RoadNetwork, RouteModel, RouteModelMeta, ShelterRegistry};

/// Creates a route model based on the provided configuration
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data
pub fn create_route_model(config: &PlannerConfig) -> Result<RouteModel, Error> {
    validate_config(config)?;

    let boundary = load_boundary(&config.boundary_path)?;

    info!("Processing walking network: {}", config.walk_network_path.display());
    let walk_network = load_road_network(&config.walk_network_path)?;
    info!("Processing driving network: {}", config.drive_network_path.display());
    let drive_network = load_road_network(&config.drive_network_path)?;

    let hazard_zones = load_polygons(&config.green_space_path)?;
    let vulnerability_zones =
        load_vulnerability_zones(&config.vulnerability_path, &config.population_property)?;
    let shelters = load_shelters(&config.shelters_path)?;

    validate_network_shelter_overlap(&walk_network, &shelters);

    let model = RouteModel {
        boundary,
        walk_network,
        drive_network,
        hazard_zones,
        vulnerability_zones,
        shelters,
        meta: RouteModelMeta {
            driving_speed_kmh: config.driving_speed_kmh,
            nearest_shelters: config.nearest_shelters,
        },
    };

    info!("{}", model.summary());
    Ok(model)
}

/// Check that input files exist and tunables are usable
///
/// # Errors
///
/// [`Error::DataLoad`] naming the first problem found
pub fn validate_config(config: &PlannerConfig) -> Result<(), Error> {
    let inputs = [
        ("Boundary", &config.boundary_path),
        ("Shelter", &config.shelters_path),
        ("Green space", &config.green_space_path),
        ("Vulnerability", &config.vulnerability_path),
        ("Walking network", &config.walk_network_path),
        ("Driving network", &config.drive_network_path),
    ];
    for (name, path) in inputs {
        if !path.exists() {
            return Err(Error::DataLoad(format!(
                "{name} file not found: {}",
                path.display()
            )));
        }
    }

    if !(config.driving_speed_kmh.is_finite() && config.driving_speed_kmh > 0.0) {
        return Err(Error::DataLoad(format!(
            "Driving speed must be positive, got {}",
            config.driving_speed_kmh
        )));
    }

    if config.nearest_shelters == 0 {
        return Err(Error::DataLoad(
            "At least one nearest shelter must be offered".to_string(),
        ));
    }

    if config.population_property.trim().is_empty() {
        return Err(Error::DataLoad(
            "Population property name is empty".to_string(),
        ));
    }

    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn validate_network_shelter_overlap(walk: &RoadNetwork, shelters: &ShelterRegistry) {
    let graph_nodes: MultiPoint = walk
        .graph
        .node_weights()
        .map(|node| node.geometry)
        .collect();
    let graph_hull = graph_nodes.convex_hull();

    let outside = shelters
        .shelters()
        .iter()
        .filter(|shelter| !shelter.geometry.intersects(&graph_hull))
        .count();

    if outside > 0 {
        let total = shelters.len();
        let percentage = (outside as f64 / total as f64) * 100.0;
        log::warn!(
            "{outside} of {total} shelters ({percentage:.1}%) are outside the walking network \
        coverage area. They will be snapped to the closest network node."
        );
    }
}

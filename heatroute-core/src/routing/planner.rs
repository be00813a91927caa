//! End-to-end planning of a heat-aware walking route and a driving comparison

use geo::Point;
use log::{debug, info};
use petgraph::graph::NodeIndex;

use crate::algo::{
    EdgeAnnotations, annotate, compare_risk, path_distance, path_metrics, path_risk,
    travel_minutes,
};
use crate::model::{
    RoadNetwork, RouteModel, RoutePath, RoutePlan, Scenario, ScenarioClassifier, Shelter,
    WeatherFeatures,
};
use crate::routing::dijkstra::{Objective, TracedPath, dijkstra_path};
use crate::Error;

/// Snap both endpoints to `network` and solve under `objective`
///
/// # Errors
///
/// [`Error::NoPointsFound`] on an empty network, [`Error::NoPathFound`] if the
/// snapped endpoints are disconnected
pub fn route_between(
    network: &RoadNetwork,
    network_name: &'static str,
    origin: &Point<f64>,
    destination: &Point<f64>,
    objective: Objective<'_>,
) -> Result<TracedPath, Error> {
    let start = network.nearest_node(origin)?;
    let target = network.nearest_node(destination)?;
    solve(network, network_name, start, target, objective)
}

fn solve(
    network: &RoadNetwork,
    network_name: &'static str,
    start: NodeIndex,
    target: NodeIndex,
    objective: Objective<'_>,
) -> Result<TracedPath, Error> {
    debug!(
        "Routing on {network_name} network by {} from {} to {}",
        objective.name(),
        start.index(),
        target.index()
    );
    dijkstra_path(network, start, target, objective).ok_or(Error::NoPathFound {
        network: network_name,
        from: start.index(),
        to: target.index(),
    })
}

/// Plan routes from `origin` to `shelter` under `scenario`
///
/// # Errors
///
/// - [`Error::OutOfBoundary`] if `origin` lies outside the model boundary
/// - [`Error::NoPathFound`] if either network cannot connect the endpoints
pub fn plan_route(
    model: &RouteModel,
    origin: &Point<f64>,
    shelter: &Shelter,
    scenario: Scenario,
) -> Result<RoutePlan, Error> {
    model.boundary.validate_origin(origin)?;

    let annotations = annotate(
        &model.walk_network,
        scenario,
        &model.hazard_zones,
        &model.vulnerability_zones,
    );
    plan_with_annotations(model, &annotations, origin, shelter)
}

/// Classify the weather first, then plan
///
/// # Errors
///
/// Same as [`plan_route`], plus [`Error::ScenarioUnavailable`] when the
/// classifier fails
pub fn plan_route_with_classifier(
    model: &RouteModel,
    origin: &Point<f64>,
    shelter: &Shelter,
    weather: &WeatherFeatures,
    classifier: &dyn ScenarioClassifier,
) -> Result<RoutePlan, Error> {
    model.boundary.validate_origin(origin)?;
    let scenario = classifier.classify(weather)?;
    info!("Classified weather as {scenario} heat scenario");
    plan_route(model, origin, shelter, scenario)
}

/// Plan against an annotation table computed earlier for `model.walk_network`
///
/// # Errors
///
/// - [`Error::AnnotationMismatch`] if `annotations` belong to another network
/// - [`Error::NoPathFound`] if either network cannot connect the endpoints
pub fn plan_with_annotations(
    model: &RouteModel,
    annotations: &EdgeAnnotations,
    origin: &Point<f64>,
    shelter: &Shelter,
) -> Result<RoutePlan, Error> {
    let scenario = annotations.scenario();
    let walk = &model.walk_network;
    let drive = &model.drive_network;
    annotations.check_network(walk)?;

    let walk_start = walk.nearest_node(origin)?;
    let walk_end = walk.nearest_node(&shelter.geometry)?;
    info!(
        "Planning {scenario} route to '{}': walking nodes {} -> {}",
        shelter.name,
        walk_start.index(),
        walk_end.index()
    );

    let heat_path = solve(
        walk,
        "walking",
        walk_start,
        walk_end,
        Objective::HeatCost(annotations),
    )?;
    let reference_path = solve(walk, "walking", walk_start, walk_end, Objective::Length)?;
    let drive_path = route_between(
        drive,
        "driving",
        origin,
        &shelter.geometry,
        Objective::Length,
    )?;

    let heat = path_metrics(walk, annotations, &heat_path.edges)?;
    let distance_shortest_ref = path_distance(walk, &reference_path.edges)?;
    let total_risk_ref = path_risk(walk, annotations, &reference_path.edges)?;
    let distance_drive = path_distance(drive, &drive_path.edges)?;

    let plan = RoutePlan {
        scenario,
        hazard_base: scenario.base_hazard(),
        destination: shelter.clone(),
        walking_path: RoutePath::from_traced(walk, heat_path),
        driving_path: RoutePath::from_traced(drive, drive_path),
        distance_heat: heat.distance,
        distance_shortest_ref,
        distance_drive,
        time_walk_minutes: travel_minutes(heat.distance, scenario.walking_speed_kmh()),
        time_drive_minutes: travel_minutes(distance_drive, model.meta.driving_speed_kmh),
        total_cost_heat: heat.cost,
        total_risk_heat: heat.risk,
        total_risk_ref,
        risk_comparison: compare_risk(heat.risk, total_risk_ref),
        water_needed_liters: scenario.water_needed(heat.distance),
        vulnerability_histogram: heat.histogram,
        dominant_vulnerability_level: heat.dominant_level,
    };

    info!(
        "Walking {:.0} m ({:.1} min, risk {:.1}), driving {:.0} m ({:.1} min)",
        plan.distance_heat,
        plan.time_walk_minutes,
        plan.total_risk_heat,
        plan.distance_drive,
        plan.time_drive_minutes
    );
    Ok(plan)
}

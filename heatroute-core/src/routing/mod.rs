pub mod dijkstra;
pub mod itinerary;
pub mod planner;

pub use planner::{plan_route, plan_route_with_classifier, plan_with_annotations, route_between};

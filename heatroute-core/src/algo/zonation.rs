//! Heat hazard zonation: base hazard discounted where a street touches green space

use crate::model::{HazardZones, RoadNetwork, StreetEdge};

/// Multiplier applied to the base hazard on edges intersecting green space
pub const GREEN_SPACE_DISCOUNT: f64 = 0.5;

/// Hazard value of a single edge. Edges without geometry are never discounted.
pub fn edge_hazard(edge: &StreetEdge, base_hazard: f64, zones: &HazardZones) -> f64 {
    match &edge.geometry {
        Some(line) if zones.intersects(line) => base_hazard * GREEN_SPACE_DISCOUNT,
        _ => base_hazard,
    }
}

/// Hazard values for every edge, indexed by `EdgeIndex::index()`
pub fn hazard_values(network: &RoadNetwork, base_hazard: f64, zones: &HazardZones) -> Vec<f64> {
    network
        .graph
        .edge_weights()
        .map(|edge| edge_hazard(edge, base_hazard, zones))
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point, polygon};

    use super::*;
    use crate::model::{RoadNetworkBuilder, Scenario};

    fn park_zones() -> HazardZones {
        HazardZones::from_polygons(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 0.01, y: 0.0),
            (x: 0.01, y: 0.01),
            (x: 0.0, y: 0.01),
        ]])
    }

    #[test]
    fn edge_inside_park_in_high_scenario_gets_half_hazard() {
        let edge = StreetEdge {
            length: 50.0,
            geometry: Some(line_string![(x: 0.002, y: 0.002), (x: 0.004, y: 0.004)]),
            parallel_index: 0,
        };
        let hazard = edge_hazard(&edge, Scenario::High.base_hazard(), &park_zones());
        assert_eq!(hazard, 40.0);
    }

    #[test]
    fn edge_without_geometry_keeps_base_hazard() {
        let edge = StreetEdge {
            length: 50.0,
            geometry: None,
            parallel_index: 0,
        };
        assert_eq!(edge_hazard(&edge, 50.0, &park_zones()), 50.0);
    }

    #[test]
    fn every_edge_gets_exactly_one_value() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.005, y: 0.005));
        let b = builder.add_node(2, point!(x: 0.02, y: 0.005));
        let c = builder.add_node(3, point!(x: 0.03, y: 0.005));
        builder.add_street(
            a,
            b,
            1600.0,
            Some(line_string![(x: 0.005, y: 0.005), (x: 0.02, y: 0.005)]),
        );
        builder.add_street(
            b,
            c,
            1100.0,
            Some(line_string![(x: 0.02, y: 0.005), (x: 0.03, y: 0.005)]),
        );
        let network = builder.build();

        let values = hazard_values(&network, 20.0, &park_zones());
        assert_eq!(values, vec![10.0, 10.0, 20.0, 20.0]);
    }
}

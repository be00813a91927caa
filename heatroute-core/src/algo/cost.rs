//! Edge cost model and the per-run annotation table
//!
//! The street network itself is never written to. Each planning run derives an
//! [`EdgeAnnotations`] table from the network, the scenario and the overlays,
//! so different scenarios can be planned against the same network side by side.

use log::{debug, info};
use petgraph::graph::EdgeIndex;

use super::overlay::{EdgeVulnerability, vulnerability_values};
use super::zonation::hazard_values;
use crate::Error;
use crate::model::{
    HazardZones, NetworkFingerprint, RoadNetwork, Scenario, VulnerabilityLevel, VulnerabilityZones,
};

/// Heat-weighted edge cost: `hazard * length * vulnerability_factor`
pub fn edge_cost(hazard_value: f64, length: f64, vulnerability_factor: f64) -> f64 {
    hazard_value * length * vulnerability_factor
}

/// Attributes derived for one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAnnotation {
    pub hazard_value: f64,
    pub vulnerability_level: VulnerabilityLevel,
    pub vulnerability_factor: f64,
    pub cost: f64,
}

/// Annotation table for one network and scenario, indexed by edge
#[derive(Debug, Clone)]
pub struct EdgeAnnotations {
    scenario: Scenario,
    network: NetworkFingerprint,
    annotations: Vec<EdgeAnnotation>,
}

impl EdgeAnnotations {
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn base_hazard(&self) -> f64 {
        self.scenario.base_hazard()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Check that the table was computed for `network`
    ///
    /// # Errors
    ///
    /// [`Error::AnnotationMismatch`] if `network` differs from the annotated one
    pub fn check_network(&self, network: &RoadNetwork) -> Result<(), Error> {
        if self.network == network.fingerprint() {
            Ok(())
        } else {
            Err(Error::AnnotationMismatch {
                annotated_edges: self.network.edges,
                network_edges: network.edge_count(),
            })
        }
    }

    pub fn get(&self, edge: EdgeIndex) -> Option<&EdgeAnnotation> {
        self.annotations.get(edge.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeIndex, &EdgeAnnotation)> {
        self.annotations
            .iter()
            .enumerate()
            .map(|(i, annotation)| (EdgeIndex::new(i), annotation))
    }

    /// Heat cost of `edge`, infinite for edges outside the table
    pub fn cost(&self, edge: EdgeIndex) -> f64 {
        self.get(edge).map_or(f64::INFINITY, |a| a.cost)
    }
}

/// Run zonation, vulnerability overlay and the cost model over every edge of
/// `network`
pub fn annotate(
    network: &RoadNetwork,
    scenario: Scenario,
    hazard_zones: &HazardZones,
    vulnerability_zones: &VulnerabilityZones,
) -> EdgeAnnotations {
    let base_hazard = scenario.base_hazard();
    let hazards = hazard_values(network, base_hazard, hazard_zones);
    let vulnerabilities = vulnerability_values(network, vulnerability_zones);

    let annotations: Vec<EdgeAnnotation> = network
        .graph
        .edge_weights()
        .zip(hazards)
        .zip(vulnerabilities)
        .map(
            |((edge, hazard_value), EdgeVulnerability { level, factor })| EdgeAnnotation {
                hazard_value,
                vulnerability_level: level,
                vulnerability_factor: factor,
                cost: edge_cost(hazard_value, edge.length, factor),
            },
        )
        .collect();

    let discounted = annotations
        .iter()
        .filter(|a| a.hazard_value < base_hazard)
        .count();
    info!(
        "Annotated {} edges for {scenario} scenario (base hazard {base_hazard})",
        annotations.len()
    );
    debug!("{discounted} edges intersect green space");

    EdgeAnnotations {
        scenario,
        network: network.fingerprint(),
        annotations,
    }
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point, polygon};

    use super::*;
    use crate::model::{RoadNetworkBuilder, VulnerabilityZone};

    #[test]
    fn cost_is_strictly_increasing_in_length() {
        let lengths = [0.0, 0.5, 1.0, 10.0, 250.0, 1e6];
        for (hazard, factor) in [(10.0, 1.0), (25.0, 1.5), (80.0, 2.0)] {
            let costs: Vec<f64> = lengths.iter().map(|&l| edge_cost(hazard, l, factor)).collect();
            assert!(costs.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(costs[0], 0.0);
            assert!(costs[1..].iter().all(|&c| c > 0.0));
        }
    }

    #[test]
    fn annotation_combines_hazard_and_vulnerability() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 1.0, y: 0.0));
        let c = builder.add_node(3, point!(x: 2.0, y: 0.0));
        let shaded = builder.add_edge(
            a,
            b,
            100.0,
            Some(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
        );
        let exposed = builder.add_edge(
            b,
            c,
            200.0,
            Some(line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)]),
        );
        let network = builder.build();

        let parks = HazardZones::from_polygons(vec![polygon![
            (x: 0.2, y: -0.5),
            (x: 0.8, y: -0.5),
            (x: 0.8, y: 0.5),
            (x: 0.2, y: 0.5),
        ]]);
        let elderly = VulnerabilityZones::new(vec![VulnerabilityZone::new(
            polygon![
                (x: 1.5, y: -0.5),
                (x: 1.9, y: -0.5),
                (x: 1.9, y: 0.5),
                (x: 1.5, y: 0.5),
            ],
            VulnerabilityLevel::High,
        )]);

        let annotations = annotate(&network, Scenario::Moderate, &parks, &elderly);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations.base_hazard(), 50.0);

        let shaded = annotations.get(shaded).unwrap();
        assert_eq!(shaded.hazard_value, 25.0);
        assert_eq!(shaded.vulnerability_level, VulnerabilityLevel::Low);
        assert_eq!(shaded.cost, 25.0 * 100.0);

        let exposed = annotations.get(exposed).unwrap();
        assert_eq!(exposed.hazard_value, 50.0);
        assert_eq!(exposed.vulnerability_level, VulnerabilityLevel::High);
        assert_eq!(exposed.cost, 50.0 * 200.0 * 2.0);
    }

    #[test]
    fn annotating_twice_does_not_accumulate() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 1.0, y: 0.0));
        builder.add_street(a, b, 10.0, None);
        let network = builder.build();

        let zones = (HazardZones::default(), VulnerabilityZones::default());
        let high = annotate(&network, Scenario::High, &zones.0, &zones.1);
        let low = annotate(&network, Scenario::Low, &zones.0, &zones.1);
        let high_again = annotate(&network, Scenario::High, &zones.0, &zones.1);

        assert_eq!(low.cost(EdgeIndex::new(0)), 200.0);
        assert_eq!(high.cost(EdgeIndex::new(0)), 800.0);
        assert_eq!(high_again.cost(EdgeIndex::new(0)), 800.0);
        assert_eq!(high.cost(EdgeIndex::new(7)), f64::INFINITY);
    }

    #[test]
    fn table_only_matches_its_own_network() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 0.001, y: 0.0));
        builder.add_street(a, b, 100.0, None);
        let network = builder.build();

        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 0.001, y: 0.0));
        builder.add_street(a, b, 130.0, None);
        let same_shape = builder.build();

        let zones = (HazardZones::default(), VulnerabilityZones::default());
        let annotations = annotate(&network, Scenario::Low, &zones.0, &zones.1);
        assert!(annotations.check_network(&network).is_ok());
        assert!(matches!(
            annotations.check_network(&same_shape),
            Err(Error::AnnotationMismatch {
                annotated_edges: 2,
                network_edges: 2
            })
        ));
    }
}

//! Risk, time and resource aggregation along solved paths

use petgraph::graph::EdgeIndex;

use super::cost::{EdgeAnnotation, EdgeAnnotations};
use crate::Error;
use crate::model::{RiskComparison, RoadNetwork, VulnerabilityHistogram, VulnerabilityLevel};

/// Aggregates of a walking path under one annotation table
#[derive(Debug, Clone, PartialEq)]
pub struct PathMetrics {
    /// Meters
    pub distance: f64,
    /// Sum of `hazard_value * length`
    pub risk: f64,
    /// Sum of heat cost
    pub cost: f64,
    pub histogram: VulnerabilityHistogram,
    /// Most severe level on the path, `Low` for an empty path
    pub dominant_level: VulnerabilityLevel,
}

fn edge_length(network: &RoadNetwork, edge: EdgeIndex) -> Result<f64, Error> {
    network
        .edge(edge)
        .map(|data| data.length)
        .ok_or(Error::UnknownEdge(edge.index()))
}

fn annotation(annotations: &EdgeAnnotations, edge: EdgeIndex) -> Result<&EdgeAnnotation, Error> {
    annotations
        .get(edge)
        .ok_or(Error::UnknownEdge(edge.index()))
}

/// Total length of `edges`
///
/// # Errors
///
/// [`Error::UnknownEdge`] if an edge is not part of `network`
pub fn path_distance(network: &RoadNetwork, edges: &[EdgeIndex]) -> Result<f64, Error> {
    edges.iter().map(|&edge| edge_length(network, edge)).sum()
}

/// Accumulate distance, risk, cost and the vulnerability histogram over the
/// edges the solver chose
///
/// # Errors
///
/// [`Error::UnknownEdge`] if an edge is missing from `network` or `annotations`
pub fn path_metrics(
    network: &RoadNetwork,
    annotations: &EdgeAnnotations,
    edges: &[EdgeIndex],
) -> Result<PathMetrics, Error> {
    let mut metrics = PathMetrics {
        distance: 0.0,
        risk: 0.0,
        cost: 0.0,
        histogram: VulnerabilityHistogram::new(),
        dominant_level: VulnerabilityLevel::Low,
    };
    let mut levels_seen: Option<VulnerabilityLevel> = None;

    for &edge in edges {
        let length = edge_length(network, edge)?;
        let annotation = annotation(annotations, edge)?;
        metrics.distance += length;
        metrics.risk += annotation.hazard_value * length;
        metrics.cost += annotation.cost;

        let level = annotation.vulnerability_level;
        let bucket = metrics.histogram.entry(level).or_default();
        bucket.length += length;
        bucket.edge_count += 1;
        levels_seen = levels_seen.max(Some(level));
    }

    metrics.dominant_level = levels_seen.unwrap_or_default();
    Ok(metrics)
}

/// Total risk of `edges`: sum of `hazard_value * length`
///
/// # Errors
///
/// [`Error::UnknownEdge`] if an edge is missing from `network` or `annotations`
pub fn path_risk(
    network: &RoadNetwork,
    annotations: &EdgeAnnotations,
    edges: &[EdgeIndex],
) -> Result<f64, Error> {
    edges
        .iter()
        .map(|&edge| Ok(annotation(annotations, edge)?.hazard_value * edge_length(network, edge)?))
        .sum()
}

/// Compare heat-path risk with reference-path risk without dividing by zero
pub fn compare_risk(heat_risk: f64, reference_risk: f64) -> RiskComparison {
    if reference_risk > 0.0 {
        RiskComparison::Reduction {
            percent: (reference_risk - heat_risk) / reference_risk * 100.0,
        }
    } else {
        RiskComparison::AbsoluteReference {
            risk: reference_risk,
        }
    }
}

/// Travel time in minutes for `distance` meters at `speed_kmh`
pub fn travel_minutes(distance: f64, speed_kmh: f64) -> f64 {
    distance / (speed_kmh / 3.6) / 60.0
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point, polygon};

    use super::*;
    use crate::algo::annotate;
    use crate::model::{
        HazardZones, LevelSummary, RoadNetworkBuilder, Scenario, VulnerabilityZone,
        VulnerabilityZones,
    };

    #[test]
    fn reduction_only_reported_for_positive_reference() {
        assert_eq!(
            compare_risk(750.0, 1000.0),
            RiskComparison::Reduction { percent: 25.0 }
        );
        assert_eq!(
            compare_risk(0.0, 0.0),
            RiskComparison::AbsoluteReference { risk: 0.0 }
        );
    }

    #[test]
    fn walking_time_uses_scenario_speed() {
        // 3 km/h covers 50 m per minute
        let minutes = travel_minutes(1000.0, Scenario::High.walking_speed_kmh());
        assert!((minutes - 20.0).abs() < 1e-9);
        let driving = travel_minutes(1000.0, 30.0);
        assert!((driving - 2.0).abs() < 1e-9);
    }

    #[test]
    fn empty_path_is_low_and_zero() {
        let network = RoadNetworkBuilder::new().build();
        let annotations = annotate(
            &network,
            Scenario::Low,
            &HazardZones::default(),
            &VulnerabilityZones::default(),
        );
        let metrics = path_metrics(&network, &annotations, &[]).unwrap();
        assert_eq!(metrics.distance, 0.0);
        assert_eq!(metrics.risk, 0.0);
        assert!(metrics.histogram.is_empty());
        assert_eq!(metrics.dominant_level, VulnerabilityLevel::Low);
    }

    #[test]
    fn histogram_groups_length_and_counts_by_level() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 1.0, y: 0.0));
        let c = builder.add_node(3, point!(x: 2.0, y: 0.0));
        let d = builder.add_node(4, point!(x: 3.0, y: 0.0));
        let ab = builder.add_edge(
            a,
            b,
            100.0,
            Some(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
        );
        let bc = builder.add_edge(
            b,
            c,
            150.0,
            Some(line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)]),
        );
        let cd = builder.add_edge(
            c,
            d,
            50.0,
            Some(line_string![(x: 2.0, y: 0.0), (x: 3.0, y: 0.0)]),
        );
        let network = builder.build();

        let medium = VulnerabilityZones::new(vec![VulnerabilityZone::new(
            polygon![
                (x: 1.2, y: -0.1),
                (x: 1.8, y: -0.1),
                (x: 1.8, y: 0.1),
                (x: 1.2, y: 0.1),
            ],
            VulnerabilityLevel::Medium,
        )]);
        let annotations = annotate(&network, Scenario::Low, &HazardZones::default(), &medium);
        let metrics = path_metrics(&network, &annotations, &[ab, bc, cd]).unwrap();

        assert_eq!(metrics.distance, 300.0);
        assert_eq!(metrics.risk, 20.0 * 300.0);
        assert_eq!(metrics.cost, 20.0 * 100.0 + 20.0 * 150.0 * 1.5 + 20.0 * 50.0);
        assert_eq!(metrics.dominant_level, VulnerabilityLevel::Medium);
        assert_eq!(
            metrics.histogram.get(&VulnerabilityLevel::Low),
            Some(&LevelSummary {
                length: 150.0,
                edge_count: 2
            })
        );
        assert_eq!(
            metrics.histogram.get(&VulnerabilityLevel::Medium),
            Some(&LevelSummary {
                length: 150.0,
                edge_count: 1
            })
        );
        assert!(!metrics.histogram.contains_key(&VulnerabilityLevel::High));
        assert_eq!(
            path_risk(&network, &annotations, &[ab, bc, cd]).unwrap(),
            metrics.risk
        );
        assert_eq!(path_distance(&network, &[ab, cd]).unwrap(), 150.0);
    }

    #[test]
    fn edges_outside_the_table_are_errors() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 1.0, y: 0.0));
        let ab = builder.add_edge(a, b, 100.0, None);
        let network = builder.build();
        let annotations = annotate(
            &network,
            Scenario::Low,
            &HazardZones::default(),
            &VulnerabilityZones::default(),
        );

        let stray = EdgeIndex::new(5);
        assert!(matches!(
            path_metrics(&network, &annotations, &[ab, stray]),
            Err(Error::UnknownEdge(5))
        ));
        assert!(matches!(
            path_risk(&network, &annotations, &[stray]),
            Err(Error::UnknownEdge(5))
        ));
        assert!(matches!(
            path_distance(&network, &[ab, stray]),
            Err(Error::UnknownEdge(5))
        ));
    }
}

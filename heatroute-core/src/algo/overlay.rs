//! Vulnerability overlay: left join of street edges against vulnerability zones
//!
//! When an edge intersects several zones the factor and the level are reduced
//! independently (`max` factor, most severe level). With zones that disagree,
//! e.g. a Medium zone carrying factor 2.0 next to a High zone carrying 1.5,
//! the resulting pair need not belong to any single zone.

use crate::model::{RoadNetwork, StreetEdge, VulnerabilityLevel, VulnerabilityZones};

/// Resolved vulnerability of one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVulnerability {
    pub level: VulnerabilityLevel,
    pub factor: f64,
}

impl Default for EdgeVulnerability {
    fn default() -> Self {
        Self {
            level: VulnerabilityLevel::Low,
            factor: VulnerabilityLevel::Low.factor(),
        }
    }
}

pub fn edge_vulnerability(edge: &StreetEdge, zones: &VulnerabilityZones) -> EdgeVulnerability {
    let Some(line) = &edge.geometry else {
        return EdgeVulnerability::default();
    };

    let mut level: Option<VulnerabilityLevel> = None;
    let mut factor: Option<f64> = None;
    for zone in zones.matching(line) {
        level = level.max(Some(zone.level));
        factor = Some(factor.map_or(zone.factor, |f| f.max(zone.factor)));
    }

    let unmatched = EdgeVulnerability::default();
    EdgeVulnerability {
        level: level.unwrap_or(unmatched.level),
        factor: factor.unwrap_or(unmatched.factor),
    }
}

/// Vulnerability for every edge, indexed by `EdgeIndex::index()`
pub fn vulnerability_values(
    network: &RoadNetwork,
    zones: &VulnerabilityZones,
) -> Vec<EdgeVulnerability> {
    network
        .graph
        .edge_weights()
        .map(|edge| edge_vulnerability(edge, zones))
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{LineString, Polygon, line_string, polygon};

    use super::*;
    use crate::model::VulnerabilityZone;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]
    }

    fn edge(line: LineString<f64>) -> StreetEdge {
        StreetEdge {
            length: 10.0,
            geometry: Some(line),
            parallel_index: 0,
        }
    }

    #[test]
    fn unmatched_edge_defaults_to_low() {
        let zones = VulnerabilityZones::new(vec![VulnerabilityZone::new(
            square(5.0, 5.0, 1.0),
            VulnerabilityLevel::High,
        )]);
        let street = edge(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]);
        let result = edge_vulnerability(&street, &zones);
        assert_eq!(
            result,
            EdgeVulnerability {
                level: VulnerabilityLevel::Low,
                factor: 1.0
            }
        );
    }

    #[test]
    fn most_severe_zone_wins_when_consistent() {
        let zones = VulnerabilityZones::new(vec![
            VulnerabilityZone::new(square(0.0, 0.0, 1.0), VulnerabilityLevel::Medium),
            VulnerabilityZone::new(square(1.0, 0.0, 1.0), VulnerabilityLevel::High),
        ]);
        let crossing = edge(line_string![(x: 0.5, y: 0.5), (x: 1.5, y: 0.5)]);
        let result = edge_vulnerability(&crossing, &zones);
        assert_eq!(result.level, VulnerabilityLevel::High);
        assert_eq!(result.factor, 2.0);
    }

    #[test]
    fn factor_and_level_reduce_independently() {
        // A Medium zone with an overridden factor of 2.0 next to a High zone
        // with factor 1.5: the pair (High, 2.0) belongs to neither zone.
        let zones = VulnerabilityZones::new(vec![
            VulnerabilityZone::new(square(0.0, 0.0, 1.0), VulnerabilityLevel::Medium)
                .with_factor(2.0),
            VulnerabilityZone::new(square(1.0, 0.0, 1.0), VulnerabilityLevel::High)
                .with_factor(1.5),
        ]);
        let crossing = edge(line_string![(x: 0.5, y: 0.5), (x: 1.5, y: 0.5)]);
        let result = edge_vulnerability(&crossing, &zones);
        assert_eq!(result.level, VulnerabilityLevel::High);
        assert_eq!(result.factor, 2.0);
    }

    #[test]
    fn canonical_factors_stay_in_the_allowed_set() {
        let zones = VulnerabilityZones::new(
            VulnerabilityLevel::ALL
                .iter()
                .enumerate()
                .map(|(i, &level)| VulnerabilityZone::new(square(i as f64 * 2.0, 0.0, 1.0), level))
                .collect(),
        );
        for x in [0.5, 2.5, 4.5, 7.0] {
            let result = edge_vulnerability(
                &edge(line_string![(x: x, y: 0.5), (x: x + 0.1, y: 0.5)]),
                &zones,
            );
            assert!([1.0, 1.5, 2.0].contains(&result.factor));
            assert_eq!(result.factor, result.level.factor());
        }
    }

    #[test]
    fn edge_without_geometry_defaults_to_low() {
        let zones = VulnerabilityZones::new(vec![VulnerabilityZone::new(
            square(0.0, 0.0, 1.0),
            VulnerabilityLevel::High,
        )]);
        let bare = StreetEdge {
            length: 10.0,
            geometry: None,
            parallel_index: 0,
        };
        assert_eq!(edge_vulnerability(&bare, &zones), EdgeVulnerability::default());
    }
}

//! Planning output records

use std::collections::BTreeMap;

use geo::{LineString, Point};
use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::Serialize;

use super::{RoadNetwork, Scenario, Shelter, VulnerabilityLevel};
use crate::routing::dijkstra::TracedPath;

/// Length and edge count of the path portion in one vulnerability level
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LevelSummary {
    /// Meters
    pub length: f64,
    pub edge_count: usize,
}

/// Per-level summary keyed in severity order
pub type VulnerabilityHistogram = BTreeMap<VulnerabilityLevel, LevelSummary>;

/// Heat-optimized path risk relative to the distance-shortest path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskComparison {
    /// Percent of reference risk avoided; negative if the heat path is riskier
    Reduction { percent: f64 },
    /// Reference path carries no risk, so only its absolute value is reported
    AbsoluteReference { risk: f64 },
}

/// Resolved path in a street network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePath {
    #[serde(skip)]
    pub nodes: Vec<NodeIndex>,
    #[serde(skip)]
    pub edges: Vec<EdgeIndex>,
    /// Source ids of the visited nodes
    pub node_ids: Vec<i64>,
    /// Visited node coordinates (lon, lat)
    pub coordinates: Vec<Point<f64>>,
}

impl RoutePath {
    pub fn from_traced(network: &RoadNetwork, path: TracedPath) -> Self {
        let (node_ids, coordinates) = path
            .nodes
            .iter()
            .filter_map(|&node| network.node(node))
            .map(|node| (node.id, node.geometry))
            .unzip();

        Self {
            nodes: path.nodes,
            edges: path.edges,
            node_ids,
            coordinates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> Option<Point<f64>> {
        self.coordinates.first().copied()
    }

    pub fn end(&self) -> Option<Point<f64>> {
        self.coordinates.last().copied()
    }

    pub fn line_string(&self) -> LineString<f64> {
        self.coordinates.iter().map(|p| p.0).collect()
    }
}

/// Complete answer to one planning request
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub scenario: Scenario,
    pub hazard_base: f64,
    pub destination: Shelter,
    pub walking_path: RoutePath,
    pub driving_path: RoutePath,
    /// Meters along the heat-optimized walking path
    pub distance_heat: f64,
    /// Meters along the distance-shortest walking path
    pub distance_shortest_ref: f64,
    /// Meters along the driving path
    pub distance_drive: f64,
    pub time_walk_minutes: f64,
    pub time_drive_minutes: f64,
    pub total_cost_heat: f64,
    pub total_risk_heat: f64,
    pub total_risk_ref: f64,
    pub risk_comparison: RiskComparison,
    pub water_needed_liters: f64,
    pub vulnerability_histogram: VulnerabilityHistogram,
    pub dominant_vulnerability_level: VulnerabilityLevel,
}

impl RoutePlan {
    /// Risk reduction in percent, when the reference path carries risk
    pub fn risk_reduction_pct(&self) -> Option<f64> {
        match self.risk_comparison {
            RiskComparison::Reduction { percent } => Some(percent),
            RiskComparison::AbsoluteReference { .. } => None,
        }
    }
}

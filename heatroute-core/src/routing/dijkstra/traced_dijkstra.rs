use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use super::state::State;
use crate::algo::EdgeAnnotations;
use crate::model::{RoadNetwork, StreetEdge};

/// Edge weighting used by the solver
#[derive(Debug, Clone, Copy)]
pub enum Objective<'a> {
    /// Physical length in meters
    Length,
    /// Heat-weighted cost from an annotation table
    HeatCost(&'a EdgeAnnotations),
}

impl Objective<'_> {
    pub fn weight(&self, edge: EdgeIndex, data: &StreetEdge) -> f64 {
        match self {
            Objective::Length => data.length,
            Objective::HeatCost(annotations) => annotations.cost(edge),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Objective::Length => "length",
            Objective::HeatCost(_) => "heat cost",
        }
    }
}

/// Path found by the solver, carrying the exact edges it relaxed so parallel
/// edges are never confused with one another
#[derive(Debug, Clone, PartialEq)]
pub struct TracedPath {
    /// Visited nodes from start to target
    pub nodes: Vec<NodeIndex>,
    /// Traversed edges, `nodes.len() - 1` of them
    pub edges: Vec<EdgeIndex>,
    /// Total weight under the objective used for the search
    pub weight: f64,
}

impl TracedPath {
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Single-pair Dijkstra over a street network.
///
/// Edges whose weight is not a finite non-negative number are skipped.
/// Returns `None` if `target` is unreachable from `start`.
pub fn dijkstra_path(
    network: &RoadNetwork,
    start: NodeIndex,
    target: NodeIndex,
    objective: Objective<'_>,
) -> Option<TracedPath> {
    let node_count = network.node_count();
    if start.index() >= node_count || target.index() >= node_count {
        return None;
    }

    let mut distances = vec![f64::INFINITY; node_count];
    let mut predecessors: Vec<Option<EdgeIndex>> = vec![None; node_count];
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::with_capacity(node_count.min(1024));

    distances[start.index()] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if settled.put(node.index()) {
            continue;
        }
        if node == target {
            break;
        }

        for edge in network.edges(node) {
            let weight = objective.weight(edge.id(), edge.weight());
            if !weight.is_finite() || weight < 0.0 {
                log::trace!("Skipping edge {:?} with weight {weight}", edge.id());
                continue;
            }

            let next = edge.target();
            let next_cost = cost + weight;
            if next_cost < distances[next.index()] {
                distances[next.index()] = next_cost;
                predecessors[next.index()] = Some(edge.id());
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    let weight = distances[target.index()];
    if !weight.is_finite() {
        return None;
    }

    // Follow predecessor edges backward from target to start
    let mut edges = Vec::new();
    let mut nodes = vec![target];
    let mut current = target;
    while current != start {
        let edge = predecessors[current.index()]?;
        let (source, _) = network.graph.edge_endpoints(edge)?;
        edges.push(edge);
        nodes.push(source);
        current = source;
    }
    edges.reverse();
    nodes.reverse();

    Some(TracedPath {
        nodes,
        edges,
        weight,
    })
}

#[cfg(test)]
mod tests {
    use geo::point;

    use super::*;
    use crate::algo::annotate;
    use crate::model::{HazardZones, RoadNetworkBuilder, Scenario, VulnerabilityZones};

    #[test]
    fn picks_cheapest_parallel_edge() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 1.0, y: 0.0));
        builder.add_edge(a, b, 300.0, None);
        let short = builder.add_edge(a, b, 120.0, None);
        builder.add_edge(a, b, 200.0, None);
        let network = builder.build();

        let path = dijkstra_path(&network, a, b, Objective::Length).unwrap();
        assert_eq!(path.edges, vec![short]);
        assert_eq!(path.nodes, vec![a, b]);
        assert_eq!(path.weight, 120.0);
        assert_eq!(network.edge_key(short).unwrap().parallel_index, 1);
    }

    #[test]
    fn prefers_lighter_detour() {
        // a -> b -> d is 200 m, a -> c -> d is 250 m
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 1.0, y: 1.0));
        let c = builder.add_node(3, point!(x: 1.0, y: -1.0));
        let d = builder.add_node(4, point!(x: 2.0, y: 0.0));
        builder.add_street(a, b, 100.0, None);
        builder.add_street(b, d, 100.0, None);
        builder.add_street(a, c, 125.0, None);
        builder.add_street(c, d, 125.0, None);
        let network = builder.build();

        let path = dijkstra_path(&network, a, d, Objective::Length).unwrap();
        assert_eq!(path.nodes, vec![a, b, d]);
        assert_eq!(path.edges.len(), 2);
        assert_eq!(path.weight, 200.0);
    }

    #[test]
    fn same_start_and_target_is_trivial() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let network = builder.build();

        let path = dijkstra_path(&network, a, a, Objective::Length).unwrap();
        assert!(path.is_trivial());
        assert_eq!(path.nodes, vec![a]);
        assert_eq!(path.weight, 0.0);
    }

    #[test]
    fn unreachable_target_returns_none() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 1.0, y: 0.0));
        let c = builder.add_node(3, point!(x: 2.0, y: 0.0));
        builder.add_edge(a, b, 10.0, None);
        // one-way street pointing away from the target side
        builder.add_edge(c, b, 10.0, None);
        let network = builder.build();

        assert!(dijkstra_path(&network, a, c, Objective::Length).is_none());
        assert!(dijkstra_path(&network, a, NodeIndex::new(42), Objective::Length).is_none());
    }

    #[test]
    fn heat_cost_objective_uses_annotation_table() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, point!(x: 0.0, y: 0.0));
        let b = builder.add_node(2, point!(x: 1.0, y: 0.0));
        builder.add_street(a, b, 10.0, None);
        let network = builder.build();
        let annotations = annotate(
            &network,
            Scenario::Moderate,
            &HazardZones::default(),
            &VulnerabilityZones::default(),
        );

        let path = dijkstra_path(&network, a, b, Objective::HeatCost(&annotations)).unwrap();
        assert_eq!(path.weight, 500.0);
    }
}

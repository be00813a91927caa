//! Street network graph with spatial index for node snapping

use geo::{Distance, Euclidean, Haversine, LineString, Point};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, EdgeReference, NodeIndex};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::components::{EdgeKey, StreetEdge, StreetNode};
use crate::Error;

/// R-tree entry: node position with its graph index
pub type IndexedPoint = GeomWithData<Point<f64>, NodeIndex>;

/// Lower bound on the length of one degree of latitude, in meters
const MIN_METERS_PER_DEGREE: f64 = 110_000.0;

/// Node and edge counts plus total street length, tying derived tables to the
/// network they were computed from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkFingerprint {
    pub nodes: usize,
    pub edges: usize,
    pub total_length: f64,
}

/// Directed street multigraph. Undirected streets are stored as two opposite
/// edges; parallel edges between the same node pair are kept apart by
/// [`StreetEdge::parallel_index`].
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: DiGraph<StreetNode, StreetEdge>,
    rtree: RTree<IndexedPoint>,
}

impl RoadNetwork {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Outgoing edges of `node`
    pub fn edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeReference<'_, StreetEdge>> {
        self.graph.edges(node)
    }

    pub fn node(&self, node: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(node)
    }

    pub fn edge(&self, edge: EdgeIndex) -> Option<&StreetEdge> {
        self.graph.edge_weight(edge)
    }

    pub fn rtree_ref(&self) -> &RTree<IndexedPoint> {
        &self.rtree
    }

    pub fn fingerprint(&self) -> NetworkFingerprint {
        NetworkFingerprint {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            total_length: self.graph.edge_weights().map(|edge| edge.length).sum(),
        }
    }

    /// Nearest network node to `point` by great-circle distance
    ///
    /// The R-tree yields candidates in planar degree order. A degree of
    /// longitude shrinks with latitude, so candidates are re-ranked by
    /// Haversine distance until the planar distance, scaled to the shortest
    /// possible meters per degree, exceeds the best match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPointsFound`] if the network has no nodes
    pub fn nearest_node(&self, point: &Point<f64>) -> Result<NodeIndex, Error> {
        let mut best: Option<(NodeIndex, f64)> = None;

        for entry in self.rtree.nearest_neighbor_iter(point) {
            let degrees = Euclidean.distance(*entry.geom(), *point);
            if let Some((_, meters)) = best {
                let widest_latitude = (point.y().abs() + degrees).min(90.0);
                let lower_bound =
                    degrees * MIN_METERS_PER_DEGREE * widest_latitude.to_radians().cos();
                if lower_bound > meters {
                    break;
                }
            }

            let meters = Haversine.distance(*entry.geom(), *point);
            if best.is_none_or(|(_, closest)| meters < closest) {
                best = Some((entry.data, meters));
            }
        }

        best.map(|(node, _)| node).ok_or(Error::NoPointsFound)
    }

    /// Multigraph identity of `edge` in terms of source node ids
    pub fn edge_key(&self, edge: EdgeIndex) -> Option<EdgeKey> {
        let (from, to) = self.graph.edge_endpoints(edge)?;
        let weight = self.graph.edge_weight(edge)?;
        Some(EdgeKey {
            from: self.graph[from].id,
            to: self.graph[to].id,
            parallel_index: weight.parallel_index,
        })
    }

    /// Resolve a multigraph identity back to the graph edge
    pub fn find_edge(&self, key: &EdgeKey) -> Option<EdgeIndex> {
        self.graph
            .edge_indices()
            .find(|&edge| self.edge_key(edge).as_ref() == Some(key))
    }
}

/// Incremental [`RoadNetwork`] construction.
///
/// Nodes are deduplicated by source id, so loaders can add edges as they
/// stream them without tracking which endpoints were already seen.
#[derive(Debug, Default)]
pub struct RoadNetworkBuilder {
    graph: DiGraph<StreetNode, StreetEdge>,
    node_ids: HashMap<i64, NodeIndex>,
    parallel_counts: HashMap<(NodeIndex, NodeIndex), usize>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or return the existing one with the same id
    pub fn add_node(&mut self, id: i64, geometry: Point<f64>) -> NodeIndex {
        if let Some(&index) = self.node_ids.get(&id) {
            return index;
        }
        let index = self.graph.add_node(StreetNode { id, geometry });
        self.node_ids.insert(id, index);
        index
    }

    pub fn node_index(&self, id: i64) -> Option<NodeIndex> {
        self.node_ids.get(&id).copied()
    }

    /// Add a one-way edge `from -> to`
    pub fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        length: f64,
        geometry: Option<LineString<f64>>,
    ) -> EdgeIndex {
        let counter = self.parallel_counts.entry((from, to)).or_insert(0);
        let parallel_index = *counter;
        *counter += 1;

        self.graph.add_edge(
            from,
            to,
            StreetEdge {
                length,
                geometry,
                parallel_index,
            },
        )
    }

    /// Add a two-way street as a pair of opposite edges
    pub fn add_street(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        length: f64,
        geometry: Option<LineString<f64>>,
    ) -> (EdgeIndex, EdgeIndex) {
        let reversed = geometry.as_ref().map(|line| {
            let mut coords = line.0.clone();
            coords.reverse();
            LineString::new(coords)
        });
        let forward = self.add_edge(a, b, length, geometry);
        let backward = self.add_edge(b, a, length, reversed);
        (forward, backward)
    }

    pub fn build(self) -> RoadNetwork {
        let points = self
            .graph
            .node_indices()
            .map(|index| IndexedPoint::new(self.graph[index].geometry, index))
            .collect();

        RoadNetwork {
            rtree: RTree::bulk_load(points),
            graph: self.graph,
        }
    }
}

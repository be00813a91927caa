//! Street network components - nodes, edges and edge identity

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

/// Street graph node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// Source (OSM) id of the node
    pub id: i64,
    /// Node coordinates (lon, lat)
    pub geometry: Point<f64>,
}

/// Street graph edge (street segment)
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Segment length in meters
    pub length: f64,
    /// Segment geometry, used for overlay with hazard and vulnerability zones
    pub geometry: Option<LineString<f64>>,
    /// Position among the parallel edges joining the same ordered node pair
    pub parallel_index: usize,
}

/// Stable identity of an edge in a multigraph: `(from, to, parallel_index)`
/// using the source node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub from: i64,
    pub to: i64,
    pub parallel_index: usize,
}

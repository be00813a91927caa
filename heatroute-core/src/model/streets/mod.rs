//! Walking and driving street network model

pub mod components;
pub mod network;

pub use components::{EdgeKey, StreetEdge, StreetNode};
pub use network::{IndexedPoint, NetworkFingerprint, RoadNetwork, RoadNetworkBuilder};

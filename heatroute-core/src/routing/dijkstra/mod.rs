mod state;
pub mod traced_dijkstra;

pub use traced_dijkstra::{Objective, TracedPath, dijkstra_path};

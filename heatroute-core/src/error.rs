use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load data: {0}")]
    DataLoad(String),
    #[error("Origin ({lon}, {lat}) is outside the operating area")]
    OutOfBoundary { lon: f64, lat: f64 },
    #[error("Heat scenario unavailable: {0}")]
    ScenarioUnavailable(String),
    #[error("No path found on the {network} network from node {from} to node {to}")]
    NoPathFound {
        network: &'static str,
        from: usize,
        to: usize,
    },
    #[error("Invalid selection {index}: {available} options available")]
    InvalidSelection { index: usize, available: usize },
    #[error("No nearby points found for snapping")]
    NoPointsFound,
    #[error("Edge annotations cover {annotated_edges} edges, the network has {network_edges}")]
    AnnotationMismatch {
        annotated_edges: usize,
        network_edges: usize,
    },
    #[error("Edge {0} is missing from the network or its annotations")]
    UnknownEdge(usize),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(#[from] geojson::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Errors the caller can recover from by asking for different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::OutOfBoundary { .. } | Error::InvalidSelection { .. }
        )
    }
}

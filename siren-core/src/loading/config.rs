use std::path::PathBuf;

/// Configuration for building the road network
#[derive(Debug, Clone)]
pub struct RoadNetworkConfig {
    /// Path to the JSON graph dataset (nodes + edges)
    pub graph_path: PathBuf,
}

impl RoadNetworkConfig {
    pub fn new(graph_path: impl Into<PathBuf>) -> Self {
        Self {
            graph_path: graph_path.into(),
        }
    }
}

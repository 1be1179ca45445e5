//! Server configuration: TOML file with CLI overrides

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    pub graph: GraphSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    /// Listen address for the HTTP API
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphSection {
    /// Path to the JSON graph dataset
    pub path: PathBuf,
    /// Maximum snap distance between a requested coordinate and its
    /// network node, in metres
    #[serde(default = "default_max_snap_distance")]
    pub max_snap_distance: f64,
}

fn default_listen() -> SocketAddr {
    "0.0.0.0:3000".parse().expect("static listen address")
}

fn default_max_snap_distance() -> f64 {
    2_000.0
}

impl ServerConfig {
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }
}

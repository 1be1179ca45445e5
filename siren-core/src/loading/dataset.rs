//! Serde view of the persisted graph dataset
//!
//! The dataset is a single JSON document:
//!
//! ```json
//! {
//!   "nodes": [{ "id": 1, "lat": 59.93, "lng": 30.31 }],
//!   "edges": [{ "from": 1, "to": 2, "weight": 120.5, "oneway": false }]
//! }
//! ```
//!
//! Weights are metres. Edges are undirected unless `oneway` is set.

use serde::Deserialize;

use crate::NodeId;

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
    #[serde(default)]
    pub oneway: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGraph {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

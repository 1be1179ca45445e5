//! Road network model
//!
//! Contains the node and edge types and the indexed graph structure
//! that route queries run against.

pub mod components;
pub mod network;

pub use components::{RoadEdge, RoadNode};
pub use network::{IndexedPoint, RoadNetwork};

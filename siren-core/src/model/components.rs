//! Road network components - nodes and edges

use geo::Point;

use crate::{Distance, NodeId};

/// Road graph node (intersection or junction)
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Dataset id of the node
    pub id: NodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Road graph edge (road segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Traversal cost in metres
    pub weight: Distance,
}

impl RoadEdge {
    pub fn cost(&self) -> Distance {
        self.weight
    }
}

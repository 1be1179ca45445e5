// Re-export key components
pub use crate::loading::{RoadNetworkConfig, create_road_network, road_network_from_json};
pub use crate::model::{RoadEdge, RoadNetwork, RoadNode};
pub use crate::routing::{Route, RoutingParams, plan_route};

// Core types for the road network
pub use crate::Distance; // metres
pub use crate::NodeId;

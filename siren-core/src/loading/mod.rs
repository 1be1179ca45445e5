//! Loading of the road-network dataset

mod builder;
mod config;
mod dataset;

pub use builder::{create_road_network, road_network_from_json};
pub use config::RoadNetworkConfig;
pub use dataset::{RawEdge, RawGraph, RawNode};

//! Route computation over the road network

pub mod dijkstra;
pub mod route;

pub use dijkstra::{ShortestPath, shortest_path};
pub use route::{Route, RoutingParams, plan_route};

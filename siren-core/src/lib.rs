//! Core routing engine for the siren emergency dispatch service.
//!
//! Holds the road-network model (nodes, weighted edges, spatial index),
//! dataset loading, and the route pipeline that snaps arbitrary coordinates
//! to the network and computes shortest paths between them. The model is
//! built once at startup and is read-only afterwards, so route queries may
//! run concurrently without coordination.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// Stable identifier of a road-network node, as assigned by the dataset
pub type NodeId = i64;

/// Edge traversal cost in metres
pub type Distance = u32;

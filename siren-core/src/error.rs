use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Graph data not loaded yet.")]
    GraphNotLoaded,
    #[error("No nearby road-network node found for the requested location")]
    NoNearbyNode,
    #[error("Start and end locations are too close together to calculate a meaningful route")]
    EndpointsTooClose,
    #[error("No route found between the requested locations")]
    NoRouteFound,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

//! Shared server state
//!
//! The road network is loaded on a background task after the listener is
//! already accepting connections. Until loading finishes the slot is
//! empty and route requests are answered with a service-unavailable
//! response. The slot is written exactly once; handlers clone the `Arc`
//! out of the lock and run against an immutable snapshot.

use std::sync::{Arc, RwLock};

use siren_core::{model::RoadNetwork, routing::RoutingParams};

pub struct AppState {
    network: RwLock<Option<Arc<RoadNetwork>>>,
    params: RoutingParams,
}

impl AppState {
    pub fn empty(params: RoutingParams) -> Self {
        Self {
            network: RwLock::new(None),
            params,
        }
    }

    /// Installs the loaded network, making route requests servable
    pub fn install(&self, network: RoadNetwork) {
        let mut slot = self.network.write().expect("state lock poisoned");
        *slot = Some(Arc::new(network));
    }

    /// Snapshot of the network, or `None` while loading is in progress
    pub fn network(&self) -> Option<Arc<RoadNetwork>> {
        self.network.read().expect("state lock poisoned").clone()
    }

    pub fn params(&self) -> &RoutingParams {
        &self.params
    }
}

mod api;
mod config;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use siren_core::loading::{RoadNetworkConfig, create_road_network};
use siren_core::routing::RoutingParams;

use crate::config::ServerConfig;
use crate::state::AppState;

/// HTTP routing service for the siren dispatch application
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "siren.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig::from_path(&args.config)?;

    let state = Arc::new(AppState::empty(RoutingParams {
        max_snap_distance: config.graph.max_snap_distance,
    }));

    // Load the graph off the runtime. Requests arriving before this
    // finishes get a service-unavailable response from the handler.
    let loader_state = state.clone();
    let graph_config = RoadNetworkConfig::new(config.graph.path.clone());
    tokio::task::spawn_blocking(move || match create_road_network(&graph_config) {
        Ok(network) => {
            info!(
                nodes = network.node_count(),
                edges = network.edge_count(),
                "road network ready"
            );
            loader_state.install(network);
        }
        Err(err) => error!(%err, "failed to load road network"),
    });

    let app = api::build_router(state);
    let listener = TcpListener::bind(config.server.listen).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to install ctrl-c handler");
    }
}

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use postdb_node::config::NodeConfig;
use postdb_node::server::{build_router, AppState};
use postdb_node::telemetry::init_telemetry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_telemetry();

    let cfg = NodeConfig::from_env()?;
    tracing::info!("Initializing postdb node with config: {:?}", cfg);

    if !cfg.db_path.exists() {
        // Not fatal: the file is read per request, so it can appear later.
        tracing::warn!("Document {:?} does not exist; requests will fail until it is created", cfg.db_path);
    }
    if cfg.serialize_writes {
        tracing::info!("Mutating requests are serialized");
    } else {
        tracing::warn!("Mutating requests are not serialized; concurrent writes may lose updates");
    }

    let state = AppState::from_config(&cfg);
    let app = build_router(state, Some(cfg.public_dir.clone()));

    let listener = TcpListener::bind(cfg.bind_addr).await?;
    tracing::info!("Listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

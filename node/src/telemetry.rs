// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::OnceLock;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const DEFAULT_FILTER: &str = "postdb_node=debug,tower_http=debug";

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => {
            tracing::warn!("Metrics disabled, failed to install Prometheus recorder: {}", e);
            return;
        }
    }

    metrics::describe_counter!("postdb_requests_total", "Requests handled, labelled by route");
    metrics::describe_counter!("postdb_request_errors_total", "Requests that ended in a server error");
    metrics::describe_counter!("postdb_store_loads_total", "Document loads from disk");
    metrics::describe_counter!("postdb_store_persists_total", "Successful document rewrites");
    metrics::describe_counter!("postdb_store_errors_total", "Failed loads and persists, labelled by op");
    metrics::describe_histogram!("postdb_persist_duration_seconds", "Time taken to rewrite the document");

    metrics::gauge!("postdb_node_up", 1.0);
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}

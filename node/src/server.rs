// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header::CACHE_CONTROL, HeaderValue, Method, StatusCode},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::sync::{Mutex, MutexGuard};
use tower::{Layer, ServiceExt};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use postdb_kernel::params::{parse_array_index, parse_flag, parse_flag_ignore_case, parse_post_id};
use postdb_kernel::state::command::Command;
use postdb_kernel::state::document::Document;
use postdb_kernel::types::post::Post;

use crate::api::*;
use crate::config::NodeConfig;
use crate::errors::ApiError;
use crate::persistence::JsonFileStore;
use crate::telemetry;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonFileStore>,
    // Present only when writes are serialized.
    write_gate: Option<Arc<Mutex<()>>>,
}

impl AppState {
    pub fn new(store: JsonFileStore, serialize_writes: bool) -> Self {
        Self {
            store: Arc::new(store),
            write_gate: serialize_writes.then(|| Arc::new(Mutex::new(()))),
        }
    }

    pub fn from_config(cfg: &NodeConfig) -> Self {
        Self::new(JsonFileStore::new(cfg.db_path.clone()), cfg.serialize_writes)
    }

    async fn write_guard(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.write_gate {
            Some(gate) => Some(gate.lock().await),
            None => None,
        }
    }
}

pub fn build_router(state: AppState, public_dir: Option<PathBuf>) -> Router {
    let routes = Router::new()
        .route("/data", get(get_data))
        .route("/posts", get(get_posts))
        .route("/index/:index", get(get_post_at))
        .route("/posts/:id", get(get_post))
        .route("/posts/add/:title/:published", get(add_post))
        .route("/published/:published", get(filter_published))
        .route("/posts/status/:id/:published", get(set_status))
        .route("/posts/delete/:id", get(delete_post))
        // Observability
        .route("/metrics", get(metrics_handler))
        .fallback(not_found)
        .with_state(state);

    // Trailing slashes are trimmed before route matching; static files see the raw path.
    let mut app = Router::new()
        .fallback_service(NormalizePathLayer::trim_trailing_slash().layer(routes));

    if let Some(dir) = public_dir {
        tracing::info!("Serving static files from {:?}", dir);
        app = app.layer(from_fn_with_state(Arc::new(dir), serve_static_first));
    } else {
        tracing::warn!("Static files disabled: no public directory configured");
    }

    app.layer(TraceLayer::new_for_http())
}

/// Serves a file from the public directory when one matches the request path,
/// before any route gets a chance. Misses fall through to the router.
async fn serve_static_first(
    State(dir): State<Arc<PathBuf>>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return next.run(req).await;
    }

    let mut probe = Request::new(Body::empty());
    *probe.method_mut() = req.method().clone();
    *probe.uri_mut() = req.uri().clone();
    *probe.headers_mut() = req.headers().clone();

    let res = match ServeDir::new(dir.as_path()).oneshot(probe).await {
        Ok(res) => res,
        Err(never) => match never {},
    };
    if res.status() == StatusCode::NOT_FOUND {
        return next.run(req).await;
    }

    metrics::counter!("postdb_requests_total", 1, "route" => "static");
    let mut res = res.map(Body::new);
    if res.status().is_success() || res.status() == StatusCode::NOT_MODIFIED {
        res.headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=0"));
    }
    res
}

fn count(route: &'static str) {
    metrics::counter!("postdb_requests_total", 1, "route" => route);
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn metrics_handler() -> String {
    telemetry::get_metrics()
}

// --- Reads ---

async fn get_data(State(state): State<AppState>) -> Result<Json<Document>, ApiError> {
    count("data");
    let doc = state.store.load().await?;
    Ok(Json(doc))
}

async fn get_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    count("posts");
    let doc = state.store.load().await?;
    Ok(Json(doc.posts))
}

async fn get_post_at(
    State(state): State<AppState>,
    Path(params): Path<IndexParams>,
) -> Result<Response, ApiError> {
    count("index");
    let doc = state.store.load().await?;
    let index = parse_array_index(&params.index);
    Ok(Lookup(doc.post_at(index)).into_response())
}

async fn get_post(
    State(state): State<AppState>,
    Path(params): Path<IdParams>,
) -> Result<Response, ApiError> {
    count("post");
    let doc = state.store.load().await?;
    let id = parse_post_id(&params.id);
    Ok(Lookup(doc.find(id)).into_response())
}

async fn filter_published(
    State(state): State<AppState>,
    Path(params): Path<FlagParams>,
) -> Result<Response, ApiError> {
    count("published");
    let doc = state.store.load().await?;
    let published = parse_flag(&params.published);
    Ok(Json(doc.published(published)).into_response())
}

// --- Mutations ---

async fn add_post(
    State(state): State<AppState>,
    Path(params): Path<AddPostParams>,
) -> Result<Json<Vec<Post>>, ApiError> {
    count("add");
    let cmd = Command::AddPost {
        title: params.title,
        published: parse_flag(&params.published),
    };
    apply_and_persist(&state, cmd).await
}

async fn set_status(
    State(state): State<AppState>,
    Path(params): Path<StatusParams>,
) -> Result<Json<Vec<Post>>, ApiError> {
    count("status");
    let cmd = Command::SetPublished {
        id: parse_post_id(&params.id),
        published: parse_flag_ignore_case(&params.published),
    };
    apply_and_persist(&state, cmd).await
}

async fn delete_post(
    State(state): State<AppState>,
    Path(params): Path<IdParams>,
) -> Result<Json<Vec<Post>>, ApiError> {
    count("delete");
    let cmd = Command::DeletePost {
        id: parse_post_id(&params.id),
    };
    apply_and_persist(&state, cmd).await
}

/// Load, apply, persist. A failed `apply` persists nothing.
async fn apply_and_persist(state: &AppState, cmd: Command) -> Result<Json<Vec<Post>>, ApiError> {
    let _guard = state.write_guard().await;

    let mut doc = state.store.load().await?;
    doc.apply(&cmd)?;
    state.store.persist(&doc).await?;

    tracing::info!("Applied {} ({} posts)", cmd.name(), doc.posts.len());
    Ok(Json(doc.posts))
}

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use postdb_node::server::{build_router, AppState};
use postdb_node::persistence::JsonFileStore;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

pub struct TestNode {
    pub dir: TempDir,
    pub db_path: PathBuf,
    pub app: Router,
}

impl TestNode {
    /// Node over a fresh `db.json` holding `doc`, without static files.
    pub fn with_document(doc: Value) -> Self {
        Self::build(doc, false, false)
    }

    pub fn build(doc: Value, serialize_writes: bool, with_public: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("db.json");
        std::fs::write(&db_path, serde_json::to_vec_pretty(&doc).unwrap()).unwrap();

        let public = dir.path().join("public");
        std::fs::create_dir(&public).unwrap();

        let state = AppState::new(JsonFileStore::new(&db_path), serialize_writes);
        let app = build_router(state, with_public.then(|| public));
        Self { dir, db_path, app }
    }

    pub fn public_dir(&self) -> PathBuf {
        self.dir.path().join("public")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        get(&self.app, uri).await
    }

    pub async fn get_json(&self, uri: &str) -> Value {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "GET {}", uri);
        serde_json::from_slice(&body).unwrap()
    }

    pub fn on_disk(&self) -> Value {
        read_json(&self.db_path)
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

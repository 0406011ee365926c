// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use postdb_kernel::error::KernelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: std::io::Error },
    #[error("malformed document in {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("failed to encode document: {0}")]
    Encode(serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Kernel(KernelError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Kernel(KernelError::EmptyCollection)
            | ApiError::Kernel(KernelError::MissingId)
            | ApiError::Kernel(KernelError::Overflow)
            | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            metrics::counter!("postdb_request_errors_total", 1);
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        // No error body on a miss; server errors carry the bare reason phrase.
        if status == StatusCode::NOT_FOUND {
            status.into_response()
        } else {
            (status, status.canonical_reason().unwrap_or("Internal Server Error")).into_response()
        }
    }
}

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

// Path parameters arrive as raw strings; coercion happens in postdb_kernel::params.

#[derive(Deserialize)]
pub struct IndexParams {
    pub index: String,
}

#[derive(Deserialize)]
pub struct IdParams {
    pub id: String,
}

#[derive(Deserialize)]
pub struct FlagParams {
    pub published: String,
}

#[derive(Deserialize)]
pub struct AddPostParams {
    pub title: String,
    pub published: String,
}

#[derive(Deserialize)]
pub struct StatusParams {
    pub id: String,
    pub published: String,
}

/// Result of a lookup that may miss.
///
/// A hit is serialized as JSON. A miss is `200 OK` with an empty body and no
/// content type.
#[derive(Debug)]
pub struct Lookup<T>(pub Option<T>);

impl<T: Serialize> IntoResponse for Lookup<T> {
    fn into_response(self) -> Response {
        match self.0 {
            Some(value) => Json(value).into_response(),
            None => StatusCode::OK.into_response(),
        }
    }
}

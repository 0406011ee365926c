// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! postdb-kernel: the I/O-free half of postdb.
//!
//! Holds the persisted [`state::document::Document`] model, the permissive
//! path-parameter coercions in [`params`], and the in-memory operations the
//! HTTP node runs between loading and persisting the document.

pub mod error;
pub mod params;
pub mod types;
pub mod state;

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Identity types.

use serde::{Deserialize, Serialize};

/// Caller-visible post id. Expected unique, never enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PostId(pub i64);

impl PostId {
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(PostId)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

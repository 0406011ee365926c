// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Mutations applied to a loaded [`Document`](crate::state::document::Document).

use crate::types::id::PostId;

/// An id of `None` is the NaN id: it matches no post.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Append a post whose id is one past the current highest id.
    AddPost {
        title: String,
        published: bool,
    },
    /// Set `published` on the first post with a matching id.
    SetPublished {
        id: Option<PostId>,
        published: bool,
    },
    /// Remove the first post with a matching id.
    DeletePost {
        id: Option<PostId>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddPost { .. } => "add_post",
            Command::SetPublished { .. } => "set_published",
            Command::DeletePost { .. } => "delete_post",
        }
    }
}

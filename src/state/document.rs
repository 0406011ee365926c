// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The persisted root object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{KernelError, Result};
use crate::state::command::Command;
use crate::types::id::PostId;
use crate::types::post::Post;

/// Root of the JSON file: a `posts` array plus any other top-level fields,
/// which are carried through load and persist opaquely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub posts: Vec<Post>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            extra: Map::new(),
        }
    }

    // --- Read APIs ---

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post_at(&self, index: Option<usize>) -> Option<&Post> {
        index.and_then(|i| self.posts.get(i))
    }

    /// First post with a matching id. Linear scan; duplicates resolve to the earliest.
    pub fn find(&self, id: Option<PostId>) -> Option<&Post> {
        self.position(id).map(|i| &self.posts[i])
    }

    pub fn position(&self, id: Option<PostId>) -> Option<usize> {
        let id = id?;
        self.posts.iter().position(|post| post.id == Some(id))
    }

    /// Id of the first post holding the maximum id, scanning left to right.
    ///
    /// A post without an integer id compares as neither greater nor smaller,
    /// so it never replaces the running maximum and is only chosen when it
    /// comes first.
    pub fn highest_id(&self) -> Result<PostId> {
        let mut iter = self.posts.iter();
        let first = iter.next().ok_or(KernelError::EmptyCollection)?;
        let highest = iter.fold(first, |prev, curr| match (curr.id, prev.id) {
            (Some(c), Some(p)) if c > p => curr,
            _ => prev,
        });
        highest.id.ok_or(KernelError::MissingId)
    }

    /// Posts whose `published` equals the flag, in document order.
    pub fn published(&self, published: bool) -> Vec<&Post> {
        self.posts.iter().filter(|post| post.published == Some(published)).collect()
    }

    // --- Write Logic ---

    /// Applies a mutation in place. On error the document is left untouched.
    pub fn apply(&mut self, cmd: &Command) -> Result<()> {
        match cmd {
            Command::AddPost { title, published } => {
                let id = self.highest_id()?.next().ok_or(KernelError::Overflow)?;
                self.posts.push(Post::new(id, title.clone(), *published));
            }
            Command::SetPublished { id, published } => {
                let index = self.position(*id).ok_or(KernelError::NotFound)?;
                self.posts[index].set_published(*published);
            }
            Command::DeletePost { id } => {
                let index = self.position(*id).ok_or(KernelError::NotFound)?;
                self.posts.remove(index);
            }
        }
        Ok(())
    }
}

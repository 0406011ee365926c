// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::id::PostId;

const ID: &str = "id";
const TITLE: &str = "title";
const PUBLISHED: &str = "published";

/// One record of the `posts` collection.
///
/// Records are never validated. A known field that is missing or holds an
/// unexpected type reads as `None` and its raw value, if any, stays in
/// `extra`, so write-back reproduces it unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Post {
    pub id: Option<PostId>,
    pub title: Option<String>,
    pub published: Option<bool>,
    /// Fields this service does not know about, written back untouched.
    pub extra: Map<String, Value>,
}

impl Post {
    pub fn new(id: PostId, title: impl Into<String>, published: bool) -> Self {
        Self {
            id: Some(id),
            title: Some(title.into()),
            published: Some(published),
            extra: Map::new(),
        }
    }

    /// Sets `published`, replacing any off-shape raw value kept in `extra`.
    pub fn set_published(&mut self, published: bool) {
        self.extra.retain(|key, _| key != PUBLISHED);
        self.published = Some(published);
    }
}

impl From<Map<String, Value>> for Post {
    fn from(map: Map<String, Value>) -> Self {
        let mut post = Post {
            id: None,
            title: None,
            published: None,
            extra: Map::new(),
        };
        for (key, value) in map {
            let typed = match key.as_str() {
                ID => value.as_i64().map(|id| post.id = Some(PostId(id))),
                TITLE => value.as_str().map(|title| post.title = Some(title.to_owned())),
                PUBLISHED => value.as_bool().map(|flag| post.published = Some(flag)),
                _ => None,
            };
            if typed.is_none() {
                post.extra.insert(key, value);
            }
        }
        post
    }
}

impl From<Post> for Map<String, Value> {
    fn from(post: Post) -> Self {
        let mut map = Map::new();
        if let Some(id) = post.id {
            map.insert(ID.into(), Value::from(id.0));
        }
        if let Some(title) = post.title {
            map.insert(TITLE.into(), Value::String(title));
        }
        if let Some(published) = post.published {
            map.insert(PUBLISHED.into(), Value::Bool(published));
        }
        map.extend(post.extra);
        map
    }
}

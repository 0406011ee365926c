// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! File-backed document store.
//!
//! Every call goes to disk: `load` reads and parses the whole file, `persist`
//! rewrites it in full. Nothing is cached and nothing is locked here; callers
//! that need load-mutate-persist to be atomic must serialize it themselves.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use postdb_kernel::state::document::Document;

use crate::errors::StoreError;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Document, StoreError> {
        metrics::counter!("postdb_store_loads_total", 1);

        let bytes = tokio::fs::read(&self.path).await.map_err(|source| {
            metrics::counter!("postdb_store_errors_total", 1, "op" => "load");
            StoreError::Read { path: self.display(), source }
        })?;

        serde_json::from_slice(&bytes).map_err(|source| {
            metrics::counter!("postdb_store_errors_total", 1, "op" => "load");
            StoreError::Parse { path: self.display(), source }
        })
    }

    /// Rewrites the backing file with `doc`.
    ///
    /// The document goes to a sibling temp file first and is renamed over the
    /// target, so readers see either the old or the new document. Temp names
    /// are unique per call; overlapping persists never share one.
    pub async fn persist(&self, doc: &Document) -> Result<(), StoreError> {
        let start = Instant::now();
        let data = serde_json::to_vec_pretty(doc).map_err(StoreError::Encode)?;

        let tmp_path = self.tmp_path();
        let write = async {
            tokio::fs::write(&tmp_path, &data).await?;
            tokio::fs::rename(&tmp_path, &self.path).await
        };
        if let Err(source) = write.await {
            // Best effort; the temp file may never have been created.
            let _ = tokio::fs::remove_file(&tmp_path).await;
            metrics::counter!("postdb_store_errors_total", 1, "op" => "persist");
            return Err(StoreError::Write { path: self.display(), source });
        }

        metrics::counter!("postdb_store_persists_total", 1);
        metrics::histogram!("postdb_persist_duration_seconds", start.elapsed().as_secs_f64());
        tracing::debug!("Persisted {} posts ({} bytes) to {:?}", doc.posts.len(), data.len(), self.path);
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        self.path.with_file_name(name)
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postdb_kernel::types::id::PostId;
    use postdb_kernel::types::post::Post;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_persist_then_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("db.json"));

        let doc = Document::new(vec![Post::new(PostId(1), "A", true)]);
        store.persist(&doc).await.unwrap();

        assert_eq!(store.load().await.unwrap(), doc);
        // Temp file renamed away.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        // Two-space pretty print on disk.
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("{\n  \"posts\": ["));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));
        assert!(matches!(store.load().await, Err(StoreError::Read { .. })));
    }

    #[tokio::test]
    async fn test_load_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, b"{ \"posts\": [").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load().await, Err(StoreError::Parse { .. })));

        std::fs::write(&path, b"{ \"comments\": [] }").unwrap();
        assert!(matches!(store.load().await, Err(StoreError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        // A directory in the document's place makes the rename fail after the write succeeded.
        let path = dir.path().join("db.json");
        std::fs::create_dir(&path).unwrap();
        let store = JsonFileStore::new(&path);

        for _ in 0..3 {
            let res = store.persist(&Document::default()).await;
            assert!(matches!(res, Err(StoreError::Write { .. })));
        }
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("db.json")]);
    }

    #[tokio::test]
    async fn test_persist_into_missing_dir() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope").join("db.json"));
        let res = store.persist(&Document::default()).await;
        assert!(matches!(res, Err(StoreError::Write { .. })));
    }
}

//! JSON file storage implementation.
//!
//! Stores each key as `<root>/<key>.json`. Writes go to a temporary sibling
//! file first and are renamed into place, so a crash mid-write leaves the
//! previous value intact.

use std::path::{Path, PathBuf};
use super::trait_::check_key;
use super::{Storage, Result};
use tokio::fs;
use tracing::debug;

const EXTENSION: &str = "json";

/// File-based storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, EXTENSION))
    }

    fn tmp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{}.{}.tmp", key, EXTENSION))
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        let tmp = self.tmp_path(key);
        fs::write(&tmp, value.as_bytes()).await?;
        fs::rename(&tmp, self.key_path(key)).await?;
        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        fs::remove_file(self.key_path(key)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        assert_eq!(storage.get("learningProgress").await.unwrap(), None);

        storage.set("learningProgress", r#"{"modules":{}}"#).await.unwrap();
        assert_eq!(
            storage.get("learningProgress").await.unwrap().as_deref(),
            Some(r#"{"modules":{}}"#)
        );
        assert!(dir.path().join("learningProgress.json").exists());

        storage.set("learningProgress", "{}").await.unwrap();
        assert_eq!(storage.get("learningProgress").await.unwrap().as_deref(), Some("{}"));

        storage.remove("learningProgress").await.unwrap();
        assert_eq!(storage.get("learningProgress").await.unwrap(), None);
        storage.remove("learningProgress").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_creates_root_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested");
        let mut storage = JsonStorage::new(&root).await.unwrap();

        storage.set("a.corrupt", "not json").await.unwrap();
        assert!(root.join("a.corrupt.json").exists());
        assert!(!root.join(".a.corrupt.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        assert!(storage.set("../escape", "x").await.is_err());
        assert!(storage.get("").await.is_err());
    }
}

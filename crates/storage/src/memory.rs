//! In-memory storage, for tests and throwaway sessions.

use std::collections::BTreeMap;
use super::trait_::check_key;
use super::{Storage, Result};

/// Storage backed by a map. Counts writes so callers can assert on them.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-seeded with one entry. Seeding is not counted as a write.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.into(), value.into());
        storage
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_are_counted() {
        let mut storage = MemoryStorage::with_entry("k", "v");
        assert_eq!(storage.writes(), 0);
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));

        storage.set("k", "w").await.unwrap();
        storage.set("j", "x").await.unwrap();
        assert_eq!(storage.writes(), 2);

        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
        assert_eq!(storage.get("j").await.unwrap().as_deref(), Some("x"));
        assert_eq!(storage.writes(), 2);
    }
}

//! Process-local gateway backed by a `DashMap`.
//!
//! The engine's default gateway for tests, demos and previews: collection
//! snapshots live only as long as the process. Use [`super::FileKvStore`]
//! when bookings and attendance must survive a restart.

use super::KvStore;
use crate::Result;
use dashmap::DashMap;

/// Collection snapshots held in memory, one entry per storage key.
///
/// Safe to share between tasks (wrap in `Arc` to hand the same snapshots
/// to a second engine, e.g. to simulate an app restart).
///
/// # Example
///
/// ```rust
/// use campus_records::kv::{KvStore, MemoryKvStore};
///
/// # async fn example() -> campus_records::Result<()> {
/// let store = MemoryKvStore::from_entries([("courses", b"[]".to_vec())]);
/// store.set("attendance", b"[]".to_vec()).await?;
///
/// assert_eq!(store.keys(), vec!["attendance", "courses"]);
/// assert_eq!(store.get("courses").await?, Some(b"[]".to_vec()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    snapshots: DashMap<String, Vec<u8>>,
}

impl MemoryKvStore {
    /// An empty gateway: every collection loads from seed data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway pre-populated with stored snapshots.
    #[must_use]
    pub fn from_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, Vec<u8>)>) -> Self {
        Self {
            snapshots: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Stored keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.snapshots.iter().map(|e| e.key().clone()).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.snapshots.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.snapshots.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.snapshots.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.snapshots.contains_key(key))
    }
}

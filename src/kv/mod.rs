//! Persistence gateway: key-value storage for collection snapshots.
//!
//! The engine stores each collection as one serialized document under a
//! fixed key and always rewrites the whole collection. Two backends ship:
//! - [`MemoryKvStore`]: process-local, lost on restart
//! - [`FileKvStore`]: one file per key in a directory (on-device storage)
//!
//! # Example
//!
//! ```rust,no_run
//! use campus_records::kv::{KvStore, MemoryKvStore};
//!
//! # async fn example() -> campus_records::Result<()> {
//! let store = MemoryKvStore::new();
//!
//! store.set("attendance", b"[]".to_vec()).await?;
//! let value = store.get("attendance").await?;
//! assert_eq!(value, Some(b"[]".to_vec()));
//!
//! store.delete("attendance").await?;
//! assert!(!store.exists("attendance").await?);
//! # Ok(())
//! # }
//! ```

mod file;
mod memory;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

use crate::Result;
use std::future::Future;
use std::sync::Arc;

/// Key-value store trait consumed by the student record engine.
///
/// Values are opaque bytes; the engine owns the encoding.
pub trait KvStore: Send + Sync {
    /// Get a value by key.
    ///
    /// Returns `None` if the key was never written.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Set a value for a key.
    ///
    /// Overwrites any existing value.
    fn set(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<()>> + Send;

    /// Delete a key.
    ///
    /// No-op if the key doesn't exist.
    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// Whether `key` stays within the alphabet every backend accepts: ASCII
/// alphanumerics plus `_ - .`, not starting with `.`. Keys become file
/// names in [`FileKvStore`], so this rules out separators and traversal.
pub(crate) fn is_portable_key(key: &str) -> bool {
    !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Share one store between engines (e.g. to reload from the same storage).
impl<T: KvStore> KvStore for Arc<T> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<()>> + Send {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> impl Future<Output = Result<bool>> + Send {
        (**self).exists(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_kv_set_get() {
        let store = MemoryKvStore::new();

        store.set("courses", b"[1]".to_vec()).await.unwrap();
        let value = store.get("courses").await.unwrap();

        assert_eq!(value, Some(b"[1]".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_kv_get_nonexistent() {
        let store = MemoryKvStore::new();

        assert_eq!(store.get("student").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_kv_overwrite() {
        let store = MemoryKvStore::new();

        store.set("exams", b"old".to_vec()).await.unwrap();
        store.set("exams", b"new".to_vec()).await.unwrap();

        assert_eq!(store.get("exams").await.unwrap(), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_kv_delete_and_exists() {
        let store = MemoryKvStore::new();

        assert!(!store.exists("mealBookings").await.unwrap());
        store.set("mealBookings", b"[]".to_vec()).await.unwrap();
        assert!(store.exists("mealBookings").await.unwrap());

        store.delete("mealBookings").await.unwrap();
        assert!(!store.exists("mealBookings").await.unwrap());

        // Deleting again is a no-op
        store.delete("mealBookings").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_kv_from_entries() {
        let store = MemoryKvStore::from_entries([
            ("exams", b"[]".to_vec()),
            ("courses", b"[{}]".to_vec()),
        ]);

        assert_eq!(store.keys(), vec!["courses", "exams"]);
        assert_eq!(store.get("courses").await.unwrap(), Some(b"[{}]".to_vec()));
        assert!(!store.exists("student").await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_kv_concurrent_access() {
        use std::sync::Arc;

        let store = Arc::new(MemoryKvStore::new());
        let mut handles = vec![];

        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let key = format!("key{i}");
                store.set(&key, format!("value{i}").into_bytes()).await.unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 50);
        assert_eq!(
            store.get("key7").await.unwrap(),
            Some(b"value7".to_vec())
        );
    }

    #[tokio::test]
    async fn test_file_kv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).await.unwrap();

        assert_eq!(store.get("attendance").await.unwrap(), None);

        store.set("attendance", b"[\"a\"]".to_vec()).await.unwrap();
        assert_eq!(
            store.get("attendance").await.unwrap(),
            Some(b"[\"a\"]".to_vec())
        );
        assert!(store.exists("attendance").await.unwrap());

        store.delete("attendance").await.unwrap();
        assert!(!store.exists("attendance").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_kv_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = FileKvStore::open(dir.path()).await.unwrap();
            store.set("courses", b"persisted".to_vec()).await.unwrap();
        }

        let reopened = FileKvStore::open(dir.path()).await.unwrap();
        assert_eq!(
            reopened.get("courses").await.unwrap(),
            Some(b"persisted".to_vec())
        );
    }

    #[test]
    fn test_portable_key_alphabet() {
        assert!(is_portable_key("mealBookings"));
        assert!(is_portable_key("campus.v2_attendance-x"));
        assert!(is_portable_key(""));
        assert!(!is_portable_key(".tmp"));
        assert!(!is_portable_key("campus:attendance"));
        assert!(!is_portable_key("a/b"));
    }

    #[tokio::test]
    async fn test_file_kv_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).await.unwrap();

        assert!(store.set("../escape", b"x".to_vec()).await.is_err());
        assert!(store.get("a/b").await.is_err());
        assert!(store.get("").await.is_err());
    }
}

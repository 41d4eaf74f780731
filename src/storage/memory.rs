//! In-memory counter store.
//!
//! Map-backed counters with per-entry locking. Nothing is persisted; intended
//! for tests and short-lived embedding, where isolated parallel runs each get
//! their own store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StorageResult;
use crate::storage::traits::CounterStore;

/// In-memory counter store implementation.
#[derive(Default)]
pub struct MemoryCounterStore {
    /// Counter values by context.
    counters: DashMap<String, i64>,
}

impl MemoryCounterStore {
    /// Create an empty in-memory counter store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn atomic_increment(&self, context: &str, start: i64) -> StorageResult<i64> {
        // The entry guard holds the shard lock across the read and write.
        let mut entry = self.counters.entry(context.to_string()).or_insert(start);
        let value = *entry;
        *entry += 1;
        Ok(value)
    }

    async fn get_current(&self, context: &str) -> StorageResult<Option<i64>> {
        Ok(self.counters.get(context).map(|value| *value))
    }

    async fn set_current(&self, context: &str, value: i64) -> StorageResult<()> {
        self.counters.insert(context.to_string(), value);
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_increment_from_start() {
        let store = MemoryCounterStore::new();

        assert_eq!(store.atomic_increment("invoices", 1000).await.unwrap(), 1000);
        assert_eq!(store.atomic_increment("invoices", 1000).await.unwrap(), 1001);
        assert_eq!(store.get_current("invoices").await.unwrap(), Some(1002));
    }

    #[tokio::test]
    async fn test_missing_counter() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.get_current("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_current_overrides() {
        let store = MemoryCounterStore::new();

        store.set_current("orders", 77).await.unwrap();
        assert_eq!(store.atomic_increment("orders", 1).await.unwrap(), 77);
        assert_eq!(store.atomic_increment("orders", 1).await.unwrap(), 78);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_distinct() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let store = Arc::new(MemoryCounterStore::new());
        let mut handles = Vec::new();

        for _ in 0..64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.atomic_increment("race", 1000).await.unwrap()
            }));
        }

        let mut values = HashSet::new();
        for handle in handles {
            values.insert(handle.await.unwrap());
        }

        let expected: HashSet<i64> = (1000..1064).collect();
        assert_eq!(values, expected);
    }
}

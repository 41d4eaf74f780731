//! Counter store trait definition.

use async_trait::async_trait;

use crate::error::StorageResult;

/// Durable, per-context monotonic counter storage.
///
/// The single stateful collaborator of the toolkit. Implementations own the
/// atomicity of `atomic_increment`; services never coordinate callers
/// themselves.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Return the current value for `context` and durably persist
    /// `current + 1` for the next call.
    ///
    /// An absent counter is treated as holding `start`, so the first call
    /// returns `start` and persists `start + 1`. The read-increment-write is
    /// atomic with respect to any number of concurrent callers: N calls for
    /// one context yield N distinct consecutive values.
    async fn atomic_increment(&self, context: &str, start: i64) -> StorageResult<i64>;

    /// Get the current value without incrementing.
    ///
    /// Returns `None` for a counter that has never been written.
    async fn get_current(&self, context: &str) -> StorageResult<Option<i64>>;

    /// Set the current value, creating the counter if absent.
    async fn set_current(&self, context: &str, value: i64) -> StorageResult<()>;

    /// Check if the backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}

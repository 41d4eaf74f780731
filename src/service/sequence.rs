//! Sequential identifier service.
//!
//! Monotonic per-context counters over the [`CounterStore`] trait. Uniqueness
//! under concurrency is owned by the store's atomic fetch-and-increment
//! primitive; this service only formats and forwards.

use std::sync::Arc;

use crate::config::SequenceConfig;
use crate::error::{GenError, Result};
use crate::storage::traits::CounterStore;

/// Service for monotonic sequence generation.
pub struct SequenceService {
    /// Counter store backend.
    store: Arc<dyn CounterStore>,
    /// First value for counters that have never been written.
    start: i64,
}

impl SequenceService {
    /// Create a new sequence service.
    #[must_use]
    pub fn new(store: Arc<dyn CounterStore>, config: &SequenceConfig) -> Self {
        Self {
            store,
            start: config.start,
        }
    }

    /// Get the next value for `context`, using the configured start.
    ///
    /// # Errors
    ///
    /// Propagates store failures as [`GenError::Storage`]; no retry.
    pub async fn next(&self, context: &str) -> Result<i64> {
        self.next_from(context, self.start).await
    }

    /// Get the next value for `context`, starting an absent counter at
    /// `start`.
    ///
    /// # Errors
    ///
    /// Propagates store failures as [`GenError::Storage`]; no retry.
    pub async fn next_from(&self, context: &str, start: i64) -> Result<i64> {
        self.store
            .atomic_increment(context, start)
            .await
            .map_err(GenError::Storage)
    }

    /// Get the next value formatted as an identifier.
    ///
    /// The counter value is left-padded with zeros to `padding` digits and
    /// prefixed with `prefix` (empty prefix is omitted naturally). Values
    /// wider than `padding` are not truncated.
    ///
    /// # Errors
    ///
    /// Propagates store failures as [`GenError::Storage`]; no retry.
    pub async fn sequential_id(
        &self,
        context: &str,
        prefix: &str,
        padding: usize,
    ) -> Result<String> {
        let value = self.next(context).await?;
        Ok(format!("{prefix}{value:0padding$}"))
    }

    /// The current value for `context` without incrementing, if any.
    ///
    /// # Errors
    ///
    /// Propagates store failures as [`GenError::Storage`].
    pub async fn peek(&self, context: &str) -> Result<Option<i64>> {
        self.store
            .get_current(context)
            .await
            .map_err(GenError::Storage)
    }
}

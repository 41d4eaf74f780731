//! Counter store factory.
//!
//! Creates the appropriate counter store backend based on configuration.

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{GenError, Result};
use crate::storage::file::FileCounterStore;
use crate::storage::memory::MemoryCounterStore;
use crate::storage::traits::CounterStore;

/// Create a counter store based on configuration.
///
/// # Errors
///
/// Returns an error if the backend cannot be initialized or fails its
/// health check.
pub async fn create_store(config: &StorageConfig) -> Result<Arc<dyn CounterStore>> {
    match config.backend {
        StorageBackend::File => {
            let store = FileCounterStore::new(&config.file).map_err(GenError::Storage)?;
            store.health_check().await.map_err(GenError::Storage)?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryCounterStore::new())),
    }
}

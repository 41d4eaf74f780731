//! File-based counter store.
//!
//! Each context is one JSON state file under the data directory. Writes hold
//! an exclusive `fs2` lock across the read-modify-write, and a process-level
//! mutex serializes callers within this process, so the increment is atomic
//! within and across processes sharing the directory.

use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use fs2::FileExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::FileStorageConfig;
use crate::domain::CounterState;
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::CounterStore;

/// File-based counter store implementation.
pub struct FileCounterStore {
    /// Directory for counter state files.
    counters_dir: PathBuf,
    /// Mutex coordinating file operations within this process.
    lock: Mutex<()>,
}

impl FileCounterStore {
    /// Create a new file counter store.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: &FileStorageConfig) -> StorageResult<Self> {
        let counters_dir = config.data_dir.join("counters");
        std::fs::create_dir_all(&counters_dir).map_err(|e| {
            StorageError::FileIO(format!(
                "Failed to create directory {counters_dir:?}: {e}"
            ))
        })?;

        debug!(dir = ?counters_dir, "File counter store initialized");

        Ok(Self {
            counters_dir,
            lock: Mutex::new(()),
        })
    }

    /// Get the state file path for a context.
    fn counter_path(&self, context: &str) -> PathBuf {
        self.counters_dir
            .join(format!("{}.json", sanitize_name(context)))
    }

    /// Read-modify-write a counter state under an exclusive file lock.
    ///
    /// A missing or empty state file is initialized via `init_fn` before the
    /// update is applied.
    fn update_state<I, F>(&self, context: &str, init_fn: I, update_fn: F) -> StorageResult<CounterState>
    where
        I: FnOnce() -> CounterState,
        F: FnOnce(&mut CounterState),
    {
        let path = self.counter_path(context);

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        file.lock_exclusive()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        let mut state = if file.metadata()?.len() == 0 {
            init_fn()
        } else {
            serde_json::from_reader(&file)?
        };

        update_fn(&mut state);
        state.version += 1;
        state.updated_at = chrono::Utc::now().timestamp_millis();

        // Write back (seek to beginning and truncate first).
        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        let json = serde_json::to_string_pretty(&state)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        file.unlock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        Ok(state)
    }

    /// Read a counter state under an exclusive file lock.
    fn read_state_locked(&self, context: &str) -> StorageResult<Option<CounterState>> {
        let path = self.counter_path(context);

        if !path.exists() {
            return Ok(None);
        }

        let file = std::fs::File::open(&path)?;
        file.lock_exclusive()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        let state: CounterState = serde_json::from_reader(&file)?;
        file.unlock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        Ok(Some(state))
    }
}

#[async_trait]
impl CounterStore for FileCounterStore {
    async fn atomic_increment(&self, context: &str, start: i64) -> StorageResult<i64> {
        let _guard = self.lock.lock().await;

        let mut value = 0i64;
        self.update_state(
            context,
            || CounterState::new(context.to_string(), start),
            |state| {
                value = state.current_value;
                state.current_value = value + 1;
            },
        )?;

        Ok(value)
    }

    async fn get_current(&self, context: &str) -> StorageResult<Option<i64>> {
        let _guard = self.lock.lock().await;

        Ok(self
            .read_state_locked(context)?
            .map(|state| state.current_value))
    }

    async fn set_current(&self, context: &str, value: i64) -> StorageResult<()> {
        let _guard = self.lock.lock().await;

        self.update_state(
            context,
            || CounterState::new(context.to_string(), value),
            |state| state.current_value = value,
        )?;

        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        if !self.counters_dir.exists() {
            return Err(StorageError::Unavailable);
        }

        let test_file = self.counters_dir.join(".health_check");
        tokio::fs::write(&test_file, b"ok")
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check failed: {e}")))?;
        tokio::fs::remove_file(&test_file)
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check cleanup failed: {e}")))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

/// Sanitize a context name for use as a filename.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

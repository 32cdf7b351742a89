//! Asynchronous actor-backed processing strategy
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── QueueConfig (capacity, batch_size)
//!     ├── AsyncReader (batch CSV reading)
//!     └── LedgerHandle ──▶ ledger task (owns Ledger + ScriptRunner)
//! ```
//!
//! The script is read in batches on a multi-threaded tokio runtime. Operations
//! are submitted through a [`LedgerHandle`] and awaited one by one, so the ledger
//! sees them in script order; labels bound by earlier lines stay valid for later
//! ones. The same handle could be shared with other producers without changing
//! the ledger's guarantees.

use crate::core::{Ledger, LedgerHandle};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::{ProcessingStrategy, SnapshotPaths};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Configuration for the ledger queue and script batching
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum number of commands waiting for the ledger task
    pub capacity: usize,
    /// Number of script lines read per batch
    pub batch_size: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            batch_size: 256,
        }
    }
}

impl QueueConfig {
    /// Create a new QueueConfig, replacing zero values with defaults
    pub fn new(capacity: usize, batch_size: usize) -> Self {
        let default = Self::default();

        let capacity = if capacity == 0 {
            warn!(
                capacity,
                default = default.capacity,
                "invalid queue capacity, using default"
            );
            default.capacity
        } else {
            capacity
        };

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        Self {
            capacity,
            batch_size,
        }
    }
}

/// Asynchronous processing strategy
///
/// Owns no ledger state itself; each call to `process` spawns a fresh ledger
/// task on its own runtime.
#[derive(Debug, Clone, Default)]
pub struct AsyncProcessingStrategy {
    config: QueueConfig,
    paths: SnapshotPaths,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `config` - Queue capacity and batch size
    /// * `paths` - Import and export directories
    pub fn new(config: QueueConfig, paths: SnapshotPaths) -> Self {
        Self { config, paths }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            let handle = LedgerHandle::spawn(Ledger::new(), self.config.capacity);
            if let Some(snapshot) = self.paths.load()? {
                handle
                    .restore(snapshot)
                    .await
                    .map_err(|e| format!("Failed to restore ledger: {}", e))?;
            }

            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut applied = 0usize;
            let mut failed = 0usize;

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for operation in batch {
                    let name = operation.name();
                    match handle.apply(operation).await {
                        Ok(()) => applied += 1,
                        Err(e) => {
                            failed += 1;
                            warn!(operation = name, error = %e, "operation failed");
                        }
                    }
                }
            }

            info!(applied, failed, "script processed");

            let snapshot = handle
                .snapshot()
                .await
                .map_err(|e| format!("Failed to read ledger state: {}", e))?;
            self.paths.store(&snapshot)?;

            write_accounts_csv(&snapshot.accounts, output)?;

            Ok(())
        })
    }
}

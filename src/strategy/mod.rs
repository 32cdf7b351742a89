//! Processing strategy module for operation scripts
//!
//! This module defines the Strategy pattern for complete script processing pipelines,
//! covering snapshot import, script parsing, ledger execution, snapshot export and
//! account output. Different implementations (synchronous, actor-backed asynchronous)
//! can be selected at runtime.

use crate::cli::StrategyType;
use crate::io::{export_to_dir, import_from_dir};
use crate::types::{LedgerError, LedgerSnapshot};
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, QueueConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete script processing pipelines
///
/// Each strategy reads operations from a CSV script, applies them to a ledger
/// and writes the final account states to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process a script from the input file and write account states to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the operation script
    /// * `output` - Writer receiving the accounts CSV
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The import directory cannot be read or fails validation
    /// - The export directory cannot be written
    /// - Output cannot be written
    ///
    /// Failed operations and malformed script lines are logged and skipped;
    /// they do not make this method return an error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Directories the ledger is restored from before and exported to after a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub import_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

impl SnapshotPaths {
    /// Read the import directory, if one is configured
    pub(crate) fn load(&self) -> Result<Option<LedgerSnapshot>, String> {
        match &self.import_dir {
            Some(dir) => import_from_dir(dir)
                .map(Some)
                .map_err(|e| snapshot_error("import from", dir, e)),
            None => Ok(None),
        }
    }

    /// Write a snapshot to the export directory, if one is configured
    pub(crate) fn store(&self, snapshot: &LedgerSnapshot) -> Result<(), String> {
        match &self.export_dir {
            Some(dir) => {
                export_to_dir(snapshot, dir).map_err(|e| snapshot_error("export to", dir, e))
            }
            None => Ok(()),
        }
    }
}

pub(crate) fn snapshot_error(action: &str, dir: &Path, error: LedgerError) -> String {
    format!("Failed to {} '{}': {}", action, dir.display(), error)
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional queue configuration (ignored for sync)
/// * `paths` - Import and export directories
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<QueueConfig>,
    paths: SnapshotPaths,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(paths)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, paths))
        }
    }
}

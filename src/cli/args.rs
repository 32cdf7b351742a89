use crate::strategy::{QueueConfig, SnapshotPaths};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run a wallet operation script against an in-memory ledger
#[derive(Parser, Debug)]
#[command(name = "wallet-ledger")]
#[command(about = "Run a wallet operation script and print account balances", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the operation script")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for a directly owned ledger or 'async' for a ledger task"
    )]
    pub strategy: StrategyType,

    /// Ledger command queue capacity (async mode only)
    #[arg(
        long = "queue-capacity",
        value_name = "COUNT",
        help = "Maximum number of queued ledger commands (default: 1024)"
    )]
    pub queue_capacity: Option<usize>,

    /// Number of script lines per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of script lines read per batch (default: 256)"
    )]
    pub batch_size: Option<usize>,

    /// Directory to restore the ledger from before running the script
    #[arg(long = "import", value_name = "DIR")]
    pub import_dir: Option<PathBuf>,

    /// Directory to export the ledger to after running the script
    #[arg(long = "export", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        help = "Log filter, e.g. 'debug' or 'wallet_ledger=trace' (default: warn)"
    )]
    pub log_level: Option<String>,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a QueueConfig from CLI arguments
    ///
    /// Missing values take their defaults; zero values fall back to defaults
    /// with a warning.
    pub fn to_queue_config(&self) -> QueueConfig {
        if self.queue_capacity.is_some() || self.batch_size.is_some() {
            let default = QueueConfig::default();
            QueueConfig::new(
                self.queue_capacity.unwrap_or(default.capacity),
                self.batch_size.unwrap_or(default.batch_size),
            )
        } else {
            QueueConfig::default()
        }
    }

    /// Import and export directories given on the command line
    pub fn snapshot_paths(&self) -> SnapshotPaths {
        SnapshotPaths {
            import_dir: self.import_dir.clone(),
            export_dir: self.export_dir.clone(),
        }
    }
}

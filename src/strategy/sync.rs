//! Synchronous processing strategy
//!
//! Single-threaded pipeline that owns a [`Ledger`] directly:
//! - script parsing through `SyncReader` (iterator interface)
//! - execution through `ScriptRunner`
//! - output through `csv_format::write_accounts_csv`
//!
//! Script lines are streamed one at a time; memory grows with the ledger,
//! not with the script.

use crate::core::{Ledger, ScriptRunner};
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, SnapshotPaths};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use wallet_ledger::strategy::{ProcessingStrategy, SnapshotPaths, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(SnapshotPaths::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("script.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyncProcessingStrategy {
    paths: SnapshotPaths,
}

impl SyncProcessingStrategy {
    pub fn new(paths: SnapshotPaths) -> Self {
        Self { paths }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let reader = SyncReader::new(input_path)?;

        let mut ledger = Ledger::new();
        if let Some(snapshot) = self.paths.load()? {
            ledger
                .restore(snapshot)
                .map_err(|e| format!("Failed to restore ledger: {}", e))?;
        }

        let mut runner = ScriptRunner::new();
        let mut applied = 0usize;
        let mut failed = 0usize;

        for result in reader {
            match result {
                Ok(operation) => {
                    let name = operation.name();
                    match runner.apply(&mut ledger, operation) {
                        Ok(()) => applied += 1,
                        Err(e) => {
                            failed += 1;
                            warn!(operation = name, error = %e, "operation failed");
                        }
                    }
                }
                Err(e) => warn!(error = %e, "skipping script line"),
            }
        }

        info!(applied, failed, "script processed");

        let snapshot = ledger.snapshot();
        self.paths.store(&snapshot)?;

        write_accounts_csv(&snapshot.accounts, output)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::snapshot::ACCOUNTS_FILE;
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const HEADER: &str = "op,account,amount,value,target,label\n";

    fn create_temp_csv(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(strategy: &SyncProcessingStrategy, body: &str) -> String {
        let file = create_temp_csv(body);
        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_sync_strategy_register_deposit_pay() {
        let output = run(
            &SyncProcessingStrategy::default(),
            "register,,,+992000000001,,\n\
             deposit,1,1000000,,,\n\
             pay,1,100000,auto,,p1\n",
        );
        assert_eq!(output, "id,phone,balance\n1,+992000000001,900000\n");
    }

    #[test]
    fn test_sync_strategy_continues_after_failures() {
        let output = run(
            &SyncProcessingStrategy::default(),
            "register,,,+992000000001,,\n\
             register,,,+992000000001,,\n\
             deposit,1,oops,,,\n\
             withdraw,1,10,,,\n\
             deposit,1,500,,,\n\
             pay,1,900,auto,,p1\n\
             reject,,,,p1,\n",
        );
        assert_eq!(output, "id,phone,balance\n1,+992000000001,500\n");
    }

    #[test]
    fn test_sync_strategy_outputs_accounts_in_id_order() {
        let body: String = (1..=20)
            .map(|n| format!("register,,,+9920000000{:02},,\n", n))
            .collect();
        let output = run(&SyncProcessingStrategy::default(), &body);

        let ids: Vec<u64> = output
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::default();
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_strategy_exports_and_reimports() {
        let dir = TempDir::new().unwrap();
        let exporting = SyncProcessingStrategy::new(SnapshotPaths {
            import_dir: None,
            export_dir: Some(dir.path().to_path_buf()),
        });
        run(
            &exporting,
            "register,,,+992000000001,,\n\
             deposit,1,1000,,,\n\
             pay,1,400,auto,,p1\n",
        );
        assert!(dir.path().join(ACCOUNTS_FILE).exists());

        let importing = SyncProcessingStrategy::new(SnapshotPaths {
            import_dir: Some(dir.path().to_path_buf()),
            export_dir: None,
        });
        let output = run(
            &importing,
            "register,,,+992000000002,,\n\
             deposit,1,100,,,\n",
        );
        assert_eq!(
            output,
            "id,phone,balance\n1,+992000000001,700\n2,+992000000002,0\n"
        );
    }

    #[test]
    fn test_sync_strategy_rejects_invalid_import() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ACCOUNTS_FILE), "1;+992000000001;-5\n").unwrap();

        let strategy = SyncProcessingStrategy::new(SnapshotPaths {
            import_dir: Some(dir.path().to_path_buf()),
            export_dir: None,
        });
        let file = create_temp_csv("");
        let mut output = Vec::new();

        let result = strategy.process(file.path(), &mut output);
        assert!(result.unwrap_err().contains("Failed to restore ledger"));
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}

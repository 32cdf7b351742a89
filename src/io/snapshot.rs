//! Dump files for ledger export and import
//!
//! A ledger is exported into a directory of three line-oriented files, one
//! record per line, fields separated by `;`, no header:
//!
//! ```text
//! accounts.dump    id;phone;balance
//! payments.dump    id;account_id;amount;category;status
//! favorites.dump   id;account_id;name;amount;category
//! ```
//!
//! Import reads the same layout back into a [`LedgerSnapshot`]; a missing
//! file is treated as an empty collection. Invariant checks happen in
//! `Ledger::restore`, not here.

use crate::types::{LedgerError, LedgerSnapshot};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

const DELIMITER: u8 = b';';

/// Write a snapshot into `dir`, creating the directory if needed
///
/// Existing dump files are overwritten.
pub fn export_to_dir(snapshot: &LedgerSnapshot, dir: &Path) -> Result<(), LedgerError> {
    fs::create_dir_all(dir)?;

    write_records(&dir.join(ACCOUNTS_FILE), &snapshot.accounts)?;
    write_records(&dir.join(PAYMENTS_FILE), &snapshot.payments)?;
    write_records(&dir.join(FAVORITES_FILE), &snapshot.favorites)?;

    debug!(
        dir = %dir.display(),
        accounts = snapshot.accounts.len(),
        payments = snapshot.payments.len(),
        favorites = snapshot.favorites.len(),
        "ledger exported"
    );
    Ok(())
}

/// Read a snapshot from the dump files in `dir`
///
/// # Errors
///
/// - `IoError` if `dir` does not exist or a file cannot be read
/// - `ParseError` if a line does not match its record layout
pub fn import_from_dir(dir: &Path) -> Result<LedgerSnapshot, LedgerError> {
    if !dir.is_dir() {
        return Err(LedgerError::IoError {
            message: format!("'{}' is not a directory", dir.display()),
        });
    }

    Ok(LedgerSnapshot {
        accounts: read_records(&dir.join(ACCOUNTS_FILE))?,
        payments: read_records(&dir.join(PAYMENTS_FILE))?,
        favorites: read_records(&dir.join(FAVORITES_FILE))?,
    })
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_path(path)?;

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LedgerError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_path(path)?;

    let records = reader.deserialize().collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Account, Favorite, FavoriteId, Payment, PaymentId, PaymentStatus};
    use tempfile::TempDir;

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: vec![
                Account {
                    id: 1,
                    phone: "+992000000001".to_string(),
                    balance: 900_000,
                },
                Account {
                    id: 2,
                    phone: "+992000000002".to_string(),
                    balance: 0,
                },
            ],
            payments: vec![Payment {
                id: PaymentId::from("payment-1"),
                account_id: 1,
                amount: 100_000,
                category: "auto".to_string(),
                status: PaymentStatus::InProgress,
            }],
            favorites: vec![Favorite {
                id: FavoriteId::from("favorite-1"),
                account_id: 1,
                name: "fuel".to_string(),
                amount: 100_000,
                category: "auto".to_string(),
            }],
        }
    }

    #[test]
    fn test_export_writes_line_oriented_files() {
        let dir = TempDir::new().unwrap();

        export_to_dir(&snapshot(), dir.path()).unwrap();

        let accounts = fs::read_to_string(dir.path().join(ACCOUNTS_FILE)).unwrap();
        assert_eq!(accounts, "1;+992000000001;900000\n2;+992000000002;0\n");

        let payments = fs::read_to_string(dir.path().join(PAYMENTS_FILE)).unwrap();
        assert_eq!(payments, "payment-1;1;100000;auto;INPROGRESS\n");

        let favorites = fs::read_to_string(dir.path().join(FAVORITES_FILE)).unwrap();
        assert_eq!(favorites, "favorite-1;1;fuel;100000;auto\n");
    }

    #[test]
    fn test_import_reads_back_exported_snapshot() {
        let dir = TempDir::new().unwrap();
        export_to_dir(&snapshot(), dir.path()).unwrap();

        assert_eq!(import_from_dir(dir.path()).unwrap(), snapshot());
    }

    #[test]
    fn test_import_treats_missing_files_as_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ACCOUNTS_FILE), "7;+992000000007;25\n").unwrap();

        let imported = import_from_dir(dir.path()).unwrap();

        assert_eq!(imported.accounts.len(), 1);
        assert_eq!(imported.accounts[0].id, 7);
        assert!(imported.payments.is_empty());
        assert!(imported.favorites.is_empty());
    }

    #[test]
    fn test_import_rejects_malformed_line() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PAYMENTS_FILE), "p;1;100;auto;DONE\n").unwrap();

        let result = import_from_dir(dir.path());
        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[test]
    fn test_import_from_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = import_from_dir(&dir.path().join("absent"));
        assert!(matches!(result, Err(LedgerError::IoError { .. })));
    }
}

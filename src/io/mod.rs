//! I/O module
//!
//! Handles operation scripts, account output and ledger dumps.
//!
//! # Components
//!
//! - `csv_format` - Script record conversion and account output serialization
//! - `sync_reader` - Synchronous script reader with iterator interface
//! - `async_reader` - Asynchronous script reader with batch reading interface
//! - `snapshot` - Export and import of full ledger state as dump files

pub mod async_reader;
pub mod csv_format;
pub mod snapshot;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_accounts_csv, CsvRecord};
pub use snapshot::{export_to_dir, import_from_dir};
pub use sync_reader::SyncReader;

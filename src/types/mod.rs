//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `payment`: Payments, favorites, statuses and identifiers
//! - `operation`: Operations read from scripts
//! - `snapshot`: Full-state snapshot used for export and import
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod operation;
pub mod payment;
pub mod snapshot;

pub use account::{Account, AccountId, Money};
pub use error::LedgerError;
pub use operation::Operation;
pub use payment::{Favorite, FavoriteId, Payment, PaymentId, PaymentStatus};
pub use snapshot::LedgerSnapshot;

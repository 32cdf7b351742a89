//! Wallet Ledger Library
//!
//! # Overview
//!
//! An in-memory wallet ledger: accounts identified by phone number, deposits,
//! payments with a reversible lifecycle, favorite payment templates, and
//! dump-file export/import. Operation scripts are run through a sync or an
//! async processing strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Payment, Favorite, LedgerError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Ledger operations and invariants
//!   - [`core::account_book`] - Account state and balance operations
//!   - [`core::payment_store`] - Payment and favorite records
//!   - [`core::actor`] - Serialised access from concurrent tasks
//! - [`io`] - Script parsing, account output and dump files
//! - [`strategy`] - Complete processing pipelines
//! - [`telemetry`] - Logging setup
//!
//! # Payment Lifecycle
//!
//! ```text
//! pay ──▶ INPROGRESS ──confirm──▶ OK
//!             │                    │
//!             └──reject──▶ FAIL ◀──┘ reject
//! ```
//!
//! Rejecting credits the amount back exactly once; a `FAIL` payment cannot be
//! rejected again. Repeating a payment or paying from a favorite debits the
//! same amount and category as a brand new payment.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod telemetry;
pub mod types;

pub use core::{Ledger, LedgerHandle};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, Favorite, FavoriteId, LedgerError, LedgerSnapshot, Money, Operation,
    Payment, PaymentId, PaymentStatus,
};

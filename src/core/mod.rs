//! Core business logic module
//!
//! This module contains the ledger and its collaborators:
//! - `traits` - Trait abstractions for interchangeable implementations
//! - `id_gen` - Payment and favorite id generators
//! - `account_book` - Account state and balance operations
//! - `payment_store` - Payment and favorite records
//! - `ledger` - The ledger state machine coordinating the above
//! - `script` - Label-aware execution of script operations
//! - `actor` - Serialised access to a ledger from concurrent callers

pub mod account_book;
pub mod actor;
pub mod id_gen;
pub mod ledger;
pub mod payment_store;
pub mod script;
pub mod traits;

pub use account_book::AccountBook;
pub use actor::LedgerHandle;
pub use id_gen::{SequentialIdGenerator, UuidGenerator};
pub use ledger::Ledger;
pub use payment_store::PaymentStore;
pub use script::ScriptRunner;
pub use traits::IdGenerator;

//! Full-state snapshot of a ledger
//!
//! Exchanged with the dump format in `io::snapshot` and accepted by
//! `Ledger::restore` to rebuild state.

use super::account::Account;
use super::payment::{Favorite, Payment};
use serde::{Deserialize, Serialize};

/// Complete copy of the three ledger collections
///
/// Accounts are ordered by id; payments and favorites by creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub accounts: Vec<Account>,
    pub payments: Vec<Payment>,
    pub favorites: Vec<Favorite>,
}

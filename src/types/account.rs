//! Account-related types for the wallet ledger
//!
//! This module defines the Account structure and the scalar types used
//! for identifying accounts and expressing amounts.

use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Issued sequentially by the ledger starting at 1. Never reused.
pub type AccountId = u64;

/// Amount of money in minor units (cents, dirams, kopecks...)
///
/// Signed so that non-positive inputs can be represented and rejected.
pub type Money = i64;

/// User account state
///
/// Balances only change through deposits, payment debits and
/// payment reversal credits. Accounts are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account ID
    pub id: AccountId,

    /// Phone number supplied at registration, unique across all accounts
    pub phone: String,

    /// Current balance in minor units, never negative
    pub balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier issued by the ledger
    /// * `phone` - The phone number the account is registered with
    pub fn new(id: AccountId, phone: impl Into<String>) -> Self {
        Account {
            id,
            phone: phone.into(),
            balance: 0,
        }
    }
}

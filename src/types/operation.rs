//! Operation records driven through the ledger by the CLI
//!
//! Each operation mirrors one ledger call. Payments and favorites created by
//! a script can be bound to a script-local `label`, and later operations
//! refer back to them through `target`.

use super::account::{AccountId, Money};

/// A single ledger operation read from an operation script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Register a new account for a phone number
    Register { phone: String },

    /// Credit an account
    Deposit { account: AccountId, amount: Money },

    /// Debit an account and record a payment
    Pay {
        account: AccountId,
        amount: Money,
        category: String,
        label: Option<String>,
    },

    /// Reverse the payment bound to `target`
    Reject { target: String },

    /// Confirm the payment bound to `target`
    Confirm { target: String },

    /// Pay again with the parameters of the payment bound to `target`
    Repeat {
        target: String,
        label: Option<String>,
    },

    /// Save the payment bound to `target` as a named favorite
    Favorite {
        target: String,
        name: String,
        label: Option<String>,
    },

    /// Pay using the favorite bound to `target`
    PayFavorite {
        target: String,
        label: Option<String>,
    },
}

impl Operation {
    /// Lowercase name of the operation as written in scripts
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Register { .. } => "register",
            Operation::Deposit { .. } => "deposit",
            Operation::Pay { .. } => "pay",
            Operation::Reject { .. } => "reject",
            Operation::Confirm { .. } => "confirm",
            Operation::Repeat { .. } => "repeat",
            Operation::Favorite { .. } => "favorite",
            Operation::PayFavorite { .. } => "pay_favorite",
        }
    }
}

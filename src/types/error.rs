//! Error types for the wallet ledger
//!
//! This module defines all error types that can occur while operating on the ledger.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Business Rule Errors**: Duplicate phone, non-positive amount, insufficient balance, etc.
//! - **Lookup Errors**: Account, payment or favorite not found
//! - **State Machine Errors**: Rejecting or confirming a payment in the wrong state
//! - **Glue Errors**: File I/O, parsing, snapshot validation, unavailable ledger actor

use super::account::{AccountId, Money};
use super::payment::{FavoriteId, PaymentId, PaymentStatus};
use thiserror::Error;

/// Main error type for the wallet ledger
///
/// Every failure is immediate and leaves the ledger unchanged. Retry policy,
/// if any, belongs to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Registration with a phone number that already has an account
    #[error("Phone {phone} is already registered")]
    PhoneAlreadyRegistered {
        /// The duplicate phone number
        phone: String,
    },

    /// Every account id has been issued
    #[error("No account id left to issue after {last}")]
    AccountIdExhausted {
        /// The last issued account id
        last: AccountId,
    },

    /// Deposit or payment amount is zero or negative
    #[error("Amount must be positive, got {amount}")]
    AmountMustBePositive {
        /// The rejected amount
        amount: Money,
    },

    /// Referenced account id has no matching record
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The missing account id
        account: AccountId,
    },

    /// Payment amount exceeds the current balance
    #[error("Insufficient balance on account {account}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Account id
        account: AccountId,
        /// Balance at the time of the request
        balance: Money,
        /// Requested payment amount
        requested: Money,
    },

    /// Referenced payment id has no matching record
    #[error("Payment {payment} not found")]
    PaymentNotFound {
        /// The missing payment id
        payment: PaymentId,
    },

    /// Referenced favorite id has no matching record
    #[error("Favorite {favorite} not found")]
    FavoriteNotFound {
        /// The missing favorite id
        favorite: FavoriteId,
    },

    /// Payment has already been rejected
    #[error("Payment {payment} cannot be rejected in status {status}")]
    PaymentNotRejectable {
        /// Payment id
        payment: PaymentId,
        /// Current status
        status: PaymentStatus,
    },

    /// Payment is not awaiting confirmation
    #[error("Payment {payment} cannot be confirmed in status {status}")]
    PaymentNotConfirmable {
        /// Payment id
        payment: PaymentId,
        /// Current status
        status: PaymentStatus,
    },

    /// Crediting the account would overflow its balance
    #[error("Balance overflow in {operation} for account {account}")]
    BalanceOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        account: AccountId,
    },

    /// The id generator returned an identifier that is already in use
    #[error("Generated identifier {id} is already in use")]
    DuplicateId {
        /// The colliding identifier
        id: String,
    },

    /// Operation script refers to a label that was never bound
    #[error("Unknown label '{label}'")]
    UnknownLabel {
        /// The unresolved label
        label: String,
    },

    /// Imported state violates a ledger invariant
    #[error("Invalid snapshot: {message}")]
    InvalidSnapshot {
        /// Description of the violated invariant
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV or dump parsing error occurred
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The ledger actor has shut down
    #[error("Ledger is unavailable")]
    LedgerUnavailable,
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a PhoneAlreadyRegistered error
    pub fn phone_already_registered(phone: &str) -> Self {
        LedgerError::PhoneAlreadyRegistered {
            phone: phone.to_string(),
        }
    }

    /// Create an AccountIdExhausted error
    pub fn account_id_exhausted(last: AccountId) -> Self {
        LedgerError::AccountIdExhausted { last }
    }

    /// Create an AmountMustBePositive error
    pub fn amount_must_be_positive(amount: Money) -> Self {
        LedgerError::AmountMustBePositive { amount }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(account: AccountId, balance: Money, requested: Money) -> Self {
        LedgerError::InsufficientBalance {
            account,
            balance,
            requested,
        }
    }

    /// Create a PaymentNotFound error
    pub fn payment_not_found(payment: &PaymentId) -> Self {
        LedgerError::PaymentNotFound {
            payment: payment.clone(),
        }
    }

    /// Create a FavoriteNotFound error
    pub fn favorite_not_found(favorite: &FavoriteId) -> Self {
        LedgerError::FavoriteNotFound {
            favorite: favorite.clone(),
        }
    }

    /// Create a PaymentNotRejectable error
    pub fn payment_not_rejectable(payment: &PaymentId, status: PaymentStatus) -> Self {
        LedgerError::PaymentNotRejectable {
            payment: payment.clone(),
            status,
        }
    }

    /// Create a PaymentNotConfirmable error
    pub fn payment_not_confirmable(payment: &PaymentId, status: PaymentStatus) -> Self {
        LedgerError::PaymentNotConfirmable {
            payment: payment.clone(),
            status,
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(operation: &str, account: AccountId) -> Self {
        LedgerError::BalanceOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a DuplicateId error
    pub fn duplicate_id(id: impl ToString) -> Self {
        LedgerError::DuplicateId { id: id.to_string() }
    }

    /// Create an UnknownLabel error
    pub fn unknown_label(label: &str) -> Self {
        LedgerError::UnknownLabel {
            label: label.to_string(),
        }
    }

    /// Create an InvalidSnapshot error
    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        LedgerError::InvalidSnapshot {
            message: message.into(),
        }
    }
}

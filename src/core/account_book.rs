//! Account management module
//!
//! This module provides the `AccountBook` struct which maintains the state
//! of all registered accounts and provides operations for managing balances.
//!
//! The AccountBook is responsible for:
//! - Issuing sequential account ids on registration
//! - Enforcing phone uniqueness through a phone index
//! - Applying checked balance credits and debits
//! - Providing sorted account listings for output

use crate::types::{Account, AccountId, LedgerError, Money};
use std::collections::HashMap;

/// Manages all accounts and their balances
///
/// Accounts are keyed by id for O(1) lookup, with a secondary index from
/// phone number to id so duplicate registrations are detected without a scan.
#[derive(Debug, Default)]
pub struct AccountBook {
    /// Map of account ids to account states
    accounts: HashMap<AccountId, Account>,

    /// Map of phone numbers to the account registered with them
    phones: HashMap<String, AccountId>,

    /// Last issued account id (0 before the first registration)
    last_id: AccountId,
}

impl AccountBook {
    /// Create a new AccountBook with no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an AccountBook from previously exported accounts
    ///
    /// The id counter resumes after the largest imported id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSnapshot` if ids or phones repeat, or a balance is negative.
    pub fn from_accounts(accounts: Vec<Account>) -> Result<Self, LedgerError> {
        let mut book = AccountBook::new();

        for account in accounts {
            if account.balance < 0 {
                return Err(LedgerError::invalid_snapshot(format!(
                    "account {} has negative balance {}",
                    account.id, account.balance
                )));
            }
            if book.accounts.contains_key(&account.id) {
                return Err(LedgerError::invalid_snapshot(format!(
                    "duplicate account id {}",
                    account.id
                )));
            }
            if book.phones.contains_key(&account.phone) {
                return Err(LedgerError::invalid_snapshot(format!(
                    "duplicate phone {}",
                    account.phone
                )));
            }

            book.last_id = book.last_id.max(account.id);
            book.phones.insert(account.phone.clone(), account.id);
            book.accounts.insert(account.id, account);
        }

        Ok(book)
    }

    /// Register a new account with a zero balance
    ///
    /// # Errors
    ///
    /// - `PhoneAlreadyRegistered` if the phone already has an account
    /// - `AccountIdExhausted` if the last issued id is `AccountId::MAX`
    ///
    /// The id counter is not advanced on error.
    pub fn register(&mut self, phone: &str) -> Result<&Account, LedgerError> {
        if self.phones.contains_key(phone) {
            return Err(LedgerError::phone_already_registered(phone));
        }

        let id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| LedgerError::account_id_exhausted(self.last_id))?;
        self.last_id = id;
        self.phones.insert(phone.to_string(), id);

        Ok(self
            .accounts
            .entry(id)
            .or_insert_with(|| Account::new(id, phone)))
    }

    /// Look up an account by id
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Look up an account by id, failing with `AccountNotFound`
    pub fn find(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.get(id).ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Increase an account balance
    ///
    /// # Arguments
    ///
    /// * `id` - The account to credit
    /// * `amount` - The amount to add
    /// * `operation` - Name of the calling operation, reported on overflow
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `BalanceOverflow` if the new balance does not fit, leaving the balance unchanged
    pub fn credit(
        &mut self,
        id: AccountId,
        amount: Money,
        operation: &str,
    ) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::balance_overflow(operation, id))?;

        Ok(())
    }

    /// Decrease an account balance
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `InsufficientBalance` if the balance is lower than `amount`
    pub fn debit(&mut self, id: AccountId, amount: Money) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        if account.balance < amount {
            return Err(LedgerError::insufficient_balance(
                id,
                account.balance,
                amount,
            ));
        }

        account.balance -= amount;
        Ok(())
    }

    /// Get all accounts sorted by id
    pub fn all(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account has been registered
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

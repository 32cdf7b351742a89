//! Ledger state machine
//!
//! This module provides the Ledger that owns accounts, payments and favorites
//! and coordinates the AccountBook and PaymentStore components.
//!
//! The ledger enforces business rules such as:
//! - Positive amounts for deposits and payments
//! - Non-negative balances (payments require sufficient funds)
//! - Payment status transitions (InProgress → Ok, InProgress/Ok → Fail)
//! - Exact restoration of the debited amount when a payment is rejected
//!
//! Every operation either commits completely or returns an error with no
//! observable change.

use crate::core::account_book::AccountBook;
use crate::core::id_gen::UuidGenerator;
use crate::core::payment_store::PaymentStore;
use crate::core::traits::IdGenerator;
use crate::types::{
    Account, AccountId, Favorite, FavoriteId, LedgerError, LedgerSnapshot, Money, Payment,
    PaymentId, PaymentStatus,
};
use tracing::debug;

/// In-process wallet ledger
///
/// Single-threaded: every mutating operation takes `&mut self`. Use
/// [`crate::core::LedgerHandle`] to share one ledger between concurrent callers.
pub struct Ledger {
    accounts: AccountBook,
    store: PaymentStore,
    ids: Box<dyn IdGenerator>,
}

impl Ledger {
    /// Create an empty ledger issuing random UUID payment and favorite ids
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UuidGenerator))
    }

    /// Create an empty ledger with a custom id source
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Ledger {
            accounts: AccountBook::new(),
            store: PaymentStore::new(),
            ids,
        }
    }

    /// Register a new account with a zero balance
    ///
    /// # Errors
    ///
    /// - `PhoneAlreadyRegistered` if an account already uses `phone`
    /// - `AccountIdExhausted` if an imported account already holds `AccountId::MAX`
    pub fn register_account(&mut self, phone: &str) -> Result<&Account, LedgerError> {
        let account = self.accounts.register(phone)?;
        debug!(account = account.id, phone, "account registered");
        Ok(account)
    }

    /// Credit an account
    ///
    /// Deposits are direct balance adjustments and leave no payment record.
    ///
    /// # Errors
    ///
    /// - `AmountMustBePositive` if `amount <= 0`
    /// - `AccountNotFound` if the account does not exist
    /// - `BalanceOverflow` if the balance would not fit
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::amount_must_be_positive(amount));
        }

        self.accounts.credit(account_id, amount, "deposit")?;
        debug!(account = account_id, amount, "deposit applied");
        Ok(())
    }

    /// Debit an account and record an `InProgress` payment
    ///
    /// # Errors
    ///
    /// - `AmountMustBePositive` if `amount <= 0`
    /// - `AccountNotFound` if the account does not exist
    /// - `InsufficientBalance` if the balance is lower than `amount`
    /// - `DuplicateId` if the id generator repeats an existing payment id
    pub fn pay(
        &mut self,
        account_id: AccountId,
        amount: Money,
        category: &str,
    ) -> Result<&Payment, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::amount_must_be_positive(amount));
        }

        let balance = self.accounts.find(account_id)?.balance;
        if balance < amount {
            return Err(LedgerError::insufficient_balance(
                account_id, balance, amount,
            ));
        }

        let id = self.ids.payment_id();
        if self.store.contains_payment(&id) {
            return Err(LedgerError::duplicate_id(&id));
        }

        // All checks passed; the debit and the record are committed together
        self.accounts.debit(account_id, amount)?;
        debug!(account = account_id, amount, payment = %id, category, "payment created");

        Ok(self.store.insert_payment(Payment {
            id,
            account_id,
            amount,
            category: category.to_string(),
            status: PaymentStatus::InProgress,
        }))
    }

    /// Look up an account by id
    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts.find(account_id)
    }

    /// Look up a payment by id
    pub fn find_payment_by_id(&self, payment_id: &PaymentId) -> Result<&Payment, LedgerError> {
        self.store
            .payment(payment_id)
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))
    }

    /// Look up a favorite by id
    pub fn find_favorite_by_id(&self, favorite_id: &FavoriteId) -> Result<&Favorite, LedgerError> {
        self.store
            .favorite(favorite_id)
            .ok_or_else(|| LedgerError::favorite_not_found(favorite_id))
    }

    /// Reverse a payment
    ///
    /// Marks the payment `Fail` and credits its amount back to the owning
    /// account. The credit is additive: deposits and payments made in between
    /// are preserved.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the payment does not exist
    /// - `PaymentNotRejectable` if the payment is already `Fail`
    /// - `AccountNotFound` if the owning account is missing
    /// - `BalanceOverflow` if the credit would not fit
    pub fn reject(&mut self, payment_id: &PaymentId) -> Result<(), LedgerError> {
        let payment = self
            .store
            .payment_mut(payment_id)
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))?;

        if !payment.status.is_rejectable() {
            return Err(LedgerError::payment_not_rejectable(
                payment_id,
                payment.status,
            ));
        }

        self.accounts
            .credit(payment.account_id, payment.amount, "reject")?;
        payment.status = PaymentStatus::Fail;
        debug!(
            account = payment.account_id,
            amount = payment.amount,
            payment = %payment_id,
            "payment rejected"
        );
        Ok(())
    }

    /// Confirm an `InProgress` payment, moving it to `Ok`
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the payment does not exist
    /// - `PaymentNotConfirmable` if the payment is not `InProgress`
    pub fn confirm(&mut self, payment_id: &PaymentId) -> Result<(), LedgerError> {
        let payment = self
            .store
            .payment_mut(payment_id)
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))?;
        if payment.status != PaymentStatus::InProgress {
            return Err(LedgerError::payment_not_confirmable(
                payment_id,
                payment.status,
            ));
        }

        payment.status = PaymentStatus::Ok;
        debug!(payment = %payment_id, "payment confirmed");
        Ok(())
    }

    /// Pay again with the account, amount and category of an earlier payment
    ///
    /// The new payment gets a fresh id and its own `InProgress` status.
    ///
    /// # Errors
    ///
    /// `PaymentNotFound`, plus every error [`Ledger::pay`] can return.
    pub fn repeat(&mut self, payment_id: &PaymentId) -> Result<&Payment, LedgerError> {
        let original = self.find_payment_by_id(payment_id)?;
        let (account_id, amount, category) =
            (original.account_id, original.amount, original.category.clone());

        self.pay(account_id, amount, &category)
    }

    /// Save a payment's parameters as a named favorite
    ///
    /// The favorite is a copy; later status changes on the payment do not affect it.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the payment does not exist
    /// - `AccountNotFound` if the owning account is missing
    /// - `DuplicateId` if the id generator repeats an existing favorite id
    pub fn favorite_payment(
        &mut self,
        payment_id: &PaymentId,
        name: &str,
    ) -> Result<&Favorite, LedgerError> {
        let payment = self.find_payment_by_id(payment_id)?;
        let (account_id, amount, category) =
            (payment.account_id, payment.amount, payment.category.clone());
        self.accounts.find(account_id)?;

        let id = self.ids.favorite_id();
        if self.store.contains_favorite(&id) {
            return Err(LedgerError::duplicate_id(&id));
        }

        debug!(payment = %payment_id, favorite = %id, name, "favorite created");
        Ok(self.store.insert_favorite(Favorite {
            id,
            account_id,
            name: name.to_string(),
            amount,
            category,
        }))
    }

    /// Pay using a favorite's saved parameters
    ///
    /// # Errors
    ///
    /// `FavoriteNotFound`, plus every error [`Ledger::pay`] can return.
    pub fn pay_from_favorite(&mut self, favorite_id: &FavoriteId) -> Result<&Payment, LedgerError> {
        let favorite = self.find_favorite_by_id(favorite_id)?;
        let (account_id, amount, category) =
            (favorite.account_id, favorite.amount, favorite.category.clone());

        self.pay(account_id, amount, &category)
    }

    /// Payment history of one account, in creation order
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn payments_for_account(&self, account_id: AccountId) -> Result<Vec<&Payment>, LedgerError> {
        self.accounts.find(account_id)?;
        Ok(self.store.payments_for_account(account_id))
    }

    /// All accounts sorted by id
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.all()
    }

    /// All payments in creation order
    pub fn payments(&self) -> &[Payment] {
        self.store.payments()
    }

    /// All favorites in creation order
    pub fn favorites(&self) -> &[Favorite] {
        self.store.favorites()
    }

    /// Copy the complete ledger state
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: self.accounts.all().into_iter().cloned().collect(),
            payments: self.store.payments().to_vec(),
            favorites: self.store.favorites().to_vec(),
        }
    }

    /// Replace the complete ledger state with a snapshot
    ///
    /// The snapshot is validated before anything is replaced; on error the
    /// ledger keeps its previous state. The account id counter resumes after
    /// the largest imported account id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSnapshot` if ids or phones repeat, a balance is negative,
    /// an amount is not positive, or a record refers to a missing account.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) -> Result<(), LedgerError> {
        let accounts = AccountBook::from_accounts(snapshot.accounts)?;
        let store = PaymentStore::from_records(snapshot.payments, snapshot.favorites)?;

        for payment in store.payments() {
            if payment.amount <= 0 {
                return Err(LedgerError::invalid_snapshot(format!(
                    "payment {} has non-positive amount {}",
                    payment.id, payment.amount
                )));
            }
            if accounts.get(payment.account_id).is_none() {
                return Err(LedgerError::invalid_snapshot(format!(
                    "payment {} refers to missing account {}",
                    payment.id, payment.account_id
                )));
            }
        }

        for favorite in store.favorites() {
            if favorite.amount <= 0 {
                return Err(LedgerError::invalid_snapshot(format!(
                    "favorite {} has non-positive amount {}",
                    favorite.id, favorite.amount
                )));
            }
            if accounts.get(favorite.account_id).is_none() {
                return Err(LedgerError::invalid_snapshot(format!(
                    "favorite {} refers to missing account {}",
                    favorite.id, favorite.account_id
                )));
            }
        }

        debug!(
            accounts = accounts.len(),
            payments = store.payments().len(),
            favorites = store.favorites().len(),
            "ledger restored"
        );
        self.accounts = accounts;
        self.store = store;
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

//! Operation script execution
//!
//! Applies `Operation`s read from a script to a ledger. Payment and favorite
//! ids are generated by the ledger and not known in advance, so scripts bind
//! the records they create to labels and refer to them by label afterwards.

use crate::core::ledger::Ledger;
use crate::types::{FavoriteId, LedgerError, Operation, PaymentId};
use std::collections::HashMap;

/// Applies script operations and tracks label bindings
///
/// Rebinding a label replaces the previous binding.
#[derive(Debug, Default)]
pub struct ScriptRunner {
    payments: HashMap<String, PaymentId>,
    favorites: HashMap<String, FavoriteId>,
}

impl ScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one operation to the ledger
    ///
    /// # Errors
    ///
    /// Returns `UnknownLabel` if `target` is not bound, or whatever error the
    /// underlying ledger operation returns.
    pub fn apply(&mut self, ledger: &mut Ledger, operation: Operation) -> Result<(), LedgerError> {
        match operation {
            Operation::Register { phone } => {
                ledger.register_account(&phone)?;
            }
            Operation::Deposit { account, amount } => {
                ledger.deposit(account, amount)?;
            }
            Operation::Pay {
                account,
                amount,
                category,
                label,
            } => {
                let id = ledger.pay(account, amount, &category)?.id.clone();
                self.bind_payment(label, id);
            }
            Operation::Reject { target } => {
                let id = self.payment(&target)?;
                ledger.reject(id)?;
            }
            Operation::Confirm { target } => {
                let id = self.payment(&target)?;
                ledger.confirm(id)?;
            }
            Operation::Repeat { target, label } => {
                let id = ledger.repeat(self.payment(&target)?)?.id.clone();
                self.bind_payment(label, id);
            }
            Operation::Favorite {
                target,
                name,
                label,
            } => {
                let id = ledger
                    .favorite_payment(self.payment(&target)?, &name)?
                    .id
                    .clone();
                if let Some(label) = label {
                    self.favorites.insert(label, id);
                }
            }
            Operation::PayFavorite { target, label } => {
                let favorite = self
                    .favorites
                    .get(&target)
                    .ok_or_else(|| LedgerError::unknown_label(&target))?;
                let id = ledger.pay_from_favorite(favorite)?.id.clone();
                self.bind_payment(label, id);
            }
        }

        Ok(())
    }

    /// Payment id bound to a label, if any
    pub fn payment_id(&self, label: &str) -> Option<&PaymentId> {
        self.payments.get(label)
    }

    /// Favorite id bound to a label, if any
    pub fn favorite_id(&self, label: &str) -> Option<&FavoriteId> {
        self.favorites.get(label)
    }

    fn payment(&self, label: &str) -> Result<&PaymentId, LedgerError> {
        self.payments
            .get(label)
            .ok_or_else(|| LedgerError::unknown_label(label))
    }

    fn bind_payment(&mut self, label: Option<String>, id: PaymentId) {
        if let Some(label) = label {
            self.payments.insert(label, id);
        }
    }
}

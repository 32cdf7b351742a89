//! Payment and favorite storage
//!
//! This module provides the PaymentStore component that keeps every payment
//! and favorite ever created. Records are held in creation order so snapshots
//! are stable, with an id index on each collection for O(1) lookup.
//!
//! Records are never deleted; only a payment's status can change.

use crate::types::{AccountId, Favorite, FavoriteId, LedgerError, Payment, PaymentId};
use std::collections::HashMap;

/// Payment and favorite store
#[derive(Debug, Default)]
pub struct PaymentStore {
    payments: Vec<Payment>,
    payment_index: HashMap<PaymentId, usize>,
    favorites: Vec<Favorite>,
    favorite_index: HashMap<FavoriteId, usize>,
}

impl PaymentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously exported records
    ///
    /// # Errors
    ///
    /// Returns `InvalidSnapshot` if a payment or favorite id repeats.
    pub fn from_records(
        payments: Vec<Payment>,
        favorites: Vec<Favorite>,
    ) -> Result<Self, LedgerError> {
        let mut store = PaymentStore::new();

        for payment in payments {
            if store.contains_payment(&payment.id) {
                return Err(LedgerError::invalid_snapshot(format!(
                    "duplicate payment id {}",
                    payment.id
                )));
            }
            store.insert_payment(payment);
        }

        for favorite in favorites {
            if store.contains_favorite(&favorite.id) {
                return Err(LedgerError::invalid_snapshot(format!(
                    "duplicate favorite id {}",
                    favorite.id
                )));
            }
            store.insert_favorite(favorite);
        }

        Ok(store)
    }

    /// Whether a payment with this id exists
    pub fn contains_payment(&self, id: &PaymentId) -> bool {
        self.payment_index.contains_key(id)
    }

    /// Whether a favorite with this id exists
    pub fn contains_favorite(&self, id: &FavoriteId) -> bool {
        self.favorite_index.contains_key(id)
    }

    /// Append a payment and return a reference to the stored record
    ///
    /// Callers must ensure the id is unused; see [`PaymentStore::contains_payment`].
    pub fn insert_payment(&mut self, payment: Payment) -> &Payment {
        let position = self.payments.len();
        self.payment_index.insert(payment.id.clone(), position);
        self.payments.push(payment);
        &self.payments[position]
    }

    /// Append a favorite and return a reference to the stored record
    ///
    /// Callers must ensure the id is unused; see [`PaymentStore::contains_favorite`].
    pub fn insert_favorite(&mut self, favorite: Favorite) -> &Favorite {
        let position = self.favorites.len();
        self.favorite_index.insert(favorite.id.clone(), position);
        self.favorites.push(favorite);
        &self.favorites[position]
    }

    /// Get an immutable reference to a stored payment
    pub fn payment(&self, id: &PaymentId) -> Option<&Payment> {
        self.payment_index
            .get(id)
            .map(|&position| &self.payments[position])
    }

    /// Get an immutable reference to a stored favorite
    pub fn favorite(&self, id: &FavoriteId) -> Option<&Favorite> {
        self.favorite_index
            .get(id)
            .map(|&position| &self.favorites[position])
    }

    /// Get a mutable reference to a stored payment
    ///
    /// Status transition rules are enforced by the ledger, not here.
    pub(crate) fn payment_mut(&mut self, id: &PaymentId) -> Option<&mut Payment> {
        let position = *self.payment_index.get(id)?;
        self.payments.get_mut(position)
    }

    /// All payments in creation order
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// All favorites in creation order
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Payments debited from one account, in creation order
    pub fn payments_for_account(&self, account_id: AccountId) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|payment| payment.account_id == account_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;

    fn payment(id: &str, account_id: AccountId, amount: i64) -> Payment {
        Payment {
            id: PaymentId::from(id),
            account_id,
            amount,
            category: "auto".to_string(),
            status: PaymentStatus::InProgress,
        }
    }

    fn favorite(id: &str) -> Favorite {
        Favorite {
            id: FavoriteId::from(id),
            account_id: 1,
            name: "fuel".to_string(),
            amount: 100,
            category: "auto".to_string(),
        }
    }

    #[test]
    fn test_insert_and_lookup_payment() {
        let mut store = PaymentStore::new();
        store.insert_payment(payment("p1", 1, 100));

        let stored = store.payment(&PaymentId::from("p1")).unwrap();
        assert_eq!(stored.amount, 100);
        assert!(store.contains_payment(&PaymentId::from("p1")));
        assert!(store.payment(&PaymentId::from("p2")).is_none());
    }

    #[test]
    fn test_payments_keep_creation_order() {
        let mut store = PaymentStore::new();
        store.insert_payment(payment("z", 1, 1));
        store.insert_payment(payment("a", 1, 2));
        store.insert_payment(payment("m", 1, 3));

        let ids: Vec<&str> = store.payments().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_payment_mut_updates_stored_record() {
        let mut store = PaymentStore::new();
        store.insert_payment(payment("p1", 1, 100));

        store.payment_mut(&PaymentId::from("p1")).unwrap().status = PaymentStatus::Fail;

        assert_eq!(
            store.payment(&PaymentId::from("p1")).unwrap().status,
            PaymentStatus::Fail
        );
        assert!(store.payment_mut(&PaymentId::from("nope")).is_none());
    }

    #[test]
    fn test_payments_for_account_filters_by_owner() {
        let mut store = PaymentStore::new();
        store.insert_payment(payment("p1", 1, 100));
        store.insert_payment(payment("p2", 2, 200));
        store.insert_payment(payment("p3", 1, 300));

        let amounts: Vec<i64> = store
            .payments_for_account(1)
            .iter()
            .map(|p| p.amount)
            .collect();
        assert_eq!(amounts, vec![100, 300]);
    }

    #[test]
    fn test_favorites_do_not_share_payment_ids() {
        let mut store = PaymentStore::new();
        store.insert_payment(payment("same", 1, 100));
        store.insert_favorite(favorite("same"));

        assert!(store.payment(&PaymentId::from("same")).is_some());
        assert!(store.favorite(&FavoriteId::from("same")).is_some());
        assert!(store.favorite(&FavoriteId::from("other")).is_none());
    }

    #[test]
    fn test_from_records_rejects_duplicate_ids() {
        let result = PaymentStore::from_records(
            vec![payment("p1", 1, 100), payment("p1", 1, 200)],
            vec![],
        );
        assert!(matches!(result, Err(LedgerError::InvalidSnapshot { .. })));

        let result = PaymentStore::from_records(vec![], vec![favorite("f"), favorite("f")]);
        assert!(matches!(result, Err(LedgerError::InvalidSnapshot { .. })));
    }
}

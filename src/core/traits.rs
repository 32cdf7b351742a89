//! Core traits for interchangeable ledger collaborators
//!
//! The ledger depends on these abstractions instead of concrete sources so
//! that tests can substitute deterministic implementations.

use crate::types::{FavoriteId, PaymentId};

/// Source of payment and favorite identifiers
///
/// Implementations must never hand out the same identifier twice within
/// their respective id space. `Send` is required so a ledger can be moved
/// into the task that serialises concurrent access.
pub trait IdGenerator: Send {
    /// Produce a fresh payment identifier
    fn payment_id(&mut self) -> PaymentId;

    /// Produce a fresh favorite identifier
    fn favorite_id(&mut self) -> FavoriteId;
}

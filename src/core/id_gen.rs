//! Identifier generators
//!
//! - `UuidGenerator` - random v4 UUIDs, used by default
//! - `SequentialIdGenerator` - predictable `payment-N` / `favorite-N` ids for tests and benches

use crate::core::traits::IdGenerator;
use crate::types::{FavoriteId, PaymentId};
use uuid::Uuid;

/// Collision-resistant generator backed by random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn payment_id(&mut self) -> PaymentId {
        PaymentId::from(Uuid::new_v4().to_string())
    }

    fn favorite_id(&mut self) -> FavoriteId {
        FavoriteId::from(Uuid::new_v4().to_string())
    }
}

/// Deterministic generator producing `payment-1`, `payment-2`, ... and
/// `favorite-1`, `favorite-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    payments: u64,
    favorites: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn payment_id(&mut self) -> PaymentId {
        self.payments += 1;
        PaymentId::from(format!("payment-{}", self.payments))
    }

    fn favorite_id(&mut self) -> FavoriteId {
        self.favorites += 1;
        FavoriteId::from(format!("favorite-{}", self.favorites))
    }
}

//! Payment-related types for the wallet ledger
//!
//! This module defines payments, favorite payment templates, the payment
//! status state machine and the opaque identifiers used to reference them.

use super::account::{AccountId, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment identifier
///
/// An opaque token (a random UUID unless a different generator is injected).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

/// Favorite identifier
///
/// Favorites live in their own id space, separate from payments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteId(String);

macro_rules! opaque_id {
    ($name:ident) => {
        impl $name {
            /// Borrow the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

opaque_id!(PaymentId);
opaque_id!(FavoriteId);

/// Payment status
///
/// ```text
/// InProgress ──confirm──▶ Ok
///     │                   │
///     └──────reject───────┴──▶ Fail
/// ```
///
/// `Ok` and `Fail` are terminal with respect to confirmation; only
/// `Fail` is terminal with respect to rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Initial state, set when the payment is created
    #[serde(rename = "INPROGRESS")]
    InProgress,

    /// Confirmed by an external step
    #[serde(rename = "OK")]
    Ok,

    /// Rejected; the amount has been returned to the account
    #[serde(rename = "FAIL")]
    Fail,
}

impl PaymentStatus {
    /// Whether a payment in this state may still be rejected
    pub fn is_rejectable(self) -> bool {
        matches!(self, PaymentStatus::InProgress | PaymentStatus::Ok)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PaymentStatus::InProgress => "INPROGRESS",
            PaymentStatus::Ok => "OK",
            PaymentStatus::Fail => "FAIL",
        };
        f.write_str(text)
    }
}

/// A payment made from an account
///
/// Created by a successful pay operation. Only the status changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique payment identifier
    pub id: PaymentId,

    /// The account the amount was debited from
    pub account_id: AccountId,

    /// Debited amount in minor units, always positive
    pub amount: Money,

    /// Free-form category label (auto, pharmacy, restaurants...)
    pub category: String,

    /// Current position in the status state machine
    pub status: PaymentStatus,
}

/// A named payment template
///
/// Holds a copy of the source payment's account, amount and category taken
/// when the favorite was created. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Unique favorite identifier
    pub id: FavoriteId,

    /// The account future payments will be debited from
    pub account_id: AccountId,

    /// User-supplied label
    pub name: String,

    /// Amount in minor units
    pub amount: Money,

    /// Category label
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PaymentStatus::InProgress, "INPROGRESS", true)]
    #[case(PaymentStatus::Ok, "OK", true)]
    #[case(PaymentStatus::Fail, "FAIL", false)]
    fn test_status_display_and_rejectable(
        #[case] status: PaymentStatus,
        #[case] text: &str,
        #[case] rejectable: bool,
    ) {
        assert_eq!(status.to_string(), text);
        assert_eq!(status.is_rejectable(), rejectable);
    }

    #[test]
    fn test_ids_display_their_token() {
        let payment = PaymentId::from("p-1");
        let favorite = FavoriteId::from(String::from("f-1"));
        assert_eq!(payment.to_string(), "p-1");
        assert_eq!(favorite.as_str(), "f-1");
    }
}

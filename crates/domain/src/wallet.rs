// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Virtual prepaid card and its transaction ledger.
//!
//! One card per cardholder email. The first successful payment activates
//! the card: a fixed hold is reserved out of the payment, a card number is
//! assigned, and the remainder becomes spendable balance. The ledger is
//! append-only; rows are never mutated after creation.

use crate::station::Station;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Non-spendable reserve taken from a card's first payment, in taka.
pub const HOLD_BALANCE: i64 = 200;

/// Literal prefix of every card number.
pub const CARD_PREFIX: &str = "22";

/// Number of decimal digits following the card prefix.
pub const CARD_DIGITS: usize = 8;

/// A cardholder's prepaid card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualCard {
    /// Row identifier assigned by the store.
    pub card_id: i64,
    /// Cardholder identity. Unique.
    pub email: String,
    /// Assigned on first activation; `None` until then. Unique.
    pub card_number: Option<String>,
    /// Spendable balance in taka.
    pub balance: i64,
    /// Non-spendable reserve in taka; zero until activation.
    pub hold_balance: i64,
    /// Flips to true on the first successful payment.
    pub is_active: bool,
    /// Method of the most recent payment.
    pub last_payment_method: Option<String>,
    /// Ledger id of the most recent payment transaction.
    pub last_transaction_id: Option<i64>,
    /// When the most recent payment happened.
    pub last_paid_at: Option<OffsetDateTime>,
    /// When the card was last used for a trip.
    pub last_used_at: Option<OffsetDateTime>,
    /// When the card row was created.
    pub created_at: OffsetDateTime,
}

/// Ledger entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Balance top-up.
    Payment,
    /// Balance deduction for a trip.
    Trip,
}

impl TransactionKind {
    /// Returns the string representation of the kind.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "PAYMENT",
            Self::Trip => "TRIP",
        }
    }

    /// Parses a kind from its string representation.
    #[must_use]
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "PAYMENT" => Some(Self::Payment),
            "TRIP" => Some(Self::Trip),
            _ => None,
        }
    }
}

/// One append-only ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTransaction {
    /// Row identifier assigned by the store.
    pub transaction_id: i64,
    /// The card the row belongs to.
    pub card_id: i64,
    /// Payment or trip.
    pub kind: TransactionKind,
    /// Amount in taka: added for payments, deducted for trips.
    pub amount: i64,
    /// Trip origin; `None` for payments.
    pub from_station: Option<Station>,
    /// Trip destination; `None` for payments.
    pub to_station: Option<Station>,
    /// When the row was appended.
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_kind_round_trip() {
        for kind in [TransactionKind::Payment, TransactionKind::Trip] {
            assert_eq!(TransactionKind::parse_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_transaction_kind_rejects_unknown() {
        assert_eq!(TransactionKind::parse_str("REFUND"), None);
    }
}

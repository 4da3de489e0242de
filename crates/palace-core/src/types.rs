//! # Domain Types
//!
//! Core domain types shared by the catalog, cart, checkout and ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │      Item       │   │    CartLine     │   │   Transaction   │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  name (key)     │   │  item_id        │   │  id (UUID)      │        │
//! │  │  unit_price     │──►│  item_name      │──►│  lines          │        │
//! │  │  available_qty  │   │  unit_price     │   │  timestamp      │        │
//! │  │  sold_qty       │   │  quantity       │   │  payment        │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │     ItemId      │   │ PaymentMethod   │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  1-based index  │   │  Cash           │                              │
//! │  │  into catalog   │   │  Card           │                              │
//! │  └─────────────────┘   │  Qr             │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A cart line freezes the item's name and price when it is added. A later
//! price change on the item never alters an open cart or a finalized sale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Item Id
// =============================================================================

/// Stable external reference to a catalog item: its 1-based position.
///
/// Items are never deleted, so the number an operator sees in the item list
/// keeps pointing at the same item for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(usize);

impl ItemId {
    /// Wraps a 1-based position. Zero is representable but never resolves.
    #[inline]
    pub const fn new(position: usize) -> Self {
        ItemId(position)
    }

    /// The 1-based position shown to the operator.
    #[inline]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Zero-based index into the catalog's storage.
    #[inline]
    pub(crate) fn index(&self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Item
// =============================================================================

/// A sellable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name; unique within the catalog.
    pub name: String,

    /// Current unit price.
    pub unit_price: Money,

    /// Quantity the item was stocked with.
    pub stocked_quantity: i64,

    /// Quantity not sitting in the cart and not yet sold.
    pub available_quantity: i64,

    /// Quantity finalized through checkout.
    pub sold_quantity: i64,
}

impl Item {
    /// Stock still owned by the shop: available plus reserved in the cart.
    #[inline]
    pub fn remaining_quantity(&self) -> i64 {
        self.stocked_quantity - self.sold_quantity
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the open cart.
///
/// The same item may appear on several lines; lines are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Item this line reserved stock from.
    pub item_id: ItemId,

    /// Item name at time of adding (frozen).
    pub item_name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity reserved; always positive.
    pub quantity: i64,
}

impl CartLine {
    /// Unit price × quantity.
    ///
    /// Lines only enter a cart when this fits in an i64, so the clamp in
    /// [`Money::saturating_mul`] never shows on register data.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }

    /// Unit price × quantity, or `None` on overflow.
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash; needs a tendered amount.
    Cash,
    /// Master/Visa on the card terminal.
    Card,
    /// QR wallet payment.
    Qr,
}

impl PaymentMethod {
    /// Every method the register knows about.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Qr,
    ];

    /// Label used on receipts and menus.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Master/Visa",
            PaymentMethod::Qr => "QR Payment",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "master/visa" | "visa" | "mastercard" => Ok(PaymentMethod::Card),
            "qr" | "qr payment" | "qr_payment" => Ok(PaymentMethod::Qr),
            _ => Err(CoreError::UnsupportedPaymentMethod(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Payment Detail
// =============================================================================

/// What was captured about the payment of a finalized transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetail {
    /// Cash with the amount handed over and the change returned.
    Cash { tendered: Money, change: Money },
    /// Card terminal; method only.
    Card,
    /// QR wallet; method only.
    Qr,
    /// Payment capture disabled by configuration.
    Unrecorded,
}

impl PaymentDetail {
    /// Method used, if payment capture was enabled.
    pub fn method(&self) -> Option<PaymentMethod> {
        match self {
            PaymentDetail::Cash { .. } => Some(PaymentMethod::Cash),
            PaymentDetail::Card => Some(PaymentMethod::Card),
            PaymentDetail::Qr => Some(PaymentMethod::Qr),
            PaymentDetail::Unrecorded => None,
        }
    }

    /// Change owed to the customer; zero for non-cash payments.
    pub fn change(&self) -> Money {
        match self {
            PaymentDetail::Cash { change, .. } => *change,
            _ => Money::zero(),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A finalized sale. Owned by the ledger and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Receipt id (UUID v4).
    pub id: Uuid,

    /// Cart lines as they were at finalize time.
    pub lines: Vec<CartLine>,

    /// Finalize time.
    pub timestamp: DateTime<Utc>,

    /// Payment outcome.
    pub payment: PaymentDetail,

    /// Sum of line totals.
    pub subtotal: Money,
}

impl Transaction {
    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_index() {
        assert_eq!(ItemId::new(1).index(), Some(0));
        assert_eq!(ItemId::new(0).index(), None);
        assert_eq!(ItemId::new(7).to_string(), "7");
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            item_id: ItemId::new(1),
            item_name: "Choc Chip".to_string(),
            unit_price: Money::from_cents(500),
            quantity: 3,
        };
        assert_eq!(line.line_total(), Money::from_cents(1500));
        assert_eq!(line.checked_line_total(), Some(Money::from_cents(1500)));

        let huge = CartLine {
            quantity: i64::MAX,
            ..line
        };
        assert_eq!(huge.checked_line_total(), None);
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("Cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("Master/Visa".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("QR Payment".parse::<PaymentMethod>().unwrap(), PaymentMethod::Qr);
        assert_eq!("qr".parse::<PaymentMethod>().unwrap(), PaymentMethod::Qr);

        let err = "cheque".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err, CoreError::UnsupportedPaymentMethod("cheque".to_string()));
    }

    #[test]
    fn test_payment_method_label_round_trips() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.label().parse::<PaymentMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_payment_detail_change() {
        let cash = PaymentDetail::Cash {
            tendered: Money::from_cents(2000),
            change: Money::from_cents(500),
        };
        assert_eq!(cash.change(), Money::from_cents(500));
        assert_eq!(cash.method(), Some(PaymentMethod::Cash));
        assert_eq!(PaymentDetail::Qr.change(), Money::zero());
        assert_eq!(PaymentDetail::Unrecorded.method(), None);
    }
}

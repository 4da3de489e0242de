//! # Checkout Policy
//!
//! Validates payment against the cart subtotal, then finalizes.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────┐  checkout()  ┌────────────┐   ok    ┌───────────┐            │
//! │   │ Idle │─────────────►│ Validating │────────►│ Finalized │            │
//! │   └──────┘              └─────┬──────┘         └───────────┘            │
//! │       ▲                       │ err                                     │
//! │       │                       ▼                                         │
//! │       │                 ┌──────────┐                                    │
//! │       └─────────────────│ Rejected │   (cart changes reset to Idle)     │
//! │                         └──────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Everything that can fail runs in [`validate`], before any sold counter or
//! ledger entry is touched. A rejected checkout leaves cart, catalog and
//! ledger exactly as they were.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::features::PosFeatures;
use crate::ledger::Ledger;
use crate::money::Money;
use crate::types::{PaymentDetail, PaymentMethod, Transaction};

/// Where the latest checkout attempt stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Validating,
    Finalized,
    Rejected,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Copy of the transaction now held by the ledger.
    pub transaction: Transaction,

    /// Change owed to the customer; `Some` only for cash.
    pub change: Option<Money>,
}

/// Decides whether the cart may be finalized with the given tender.
///
/// ## Rules
/// - Empty cart: `EmptyCart`
/// - Sold counts or ledger revenue that would overflow: `InvalidInput`
/// - Payment capture disabled: always `Unrecorded`, token and tender ignored
/// - Unknown or disabled method token: `UnsupportedPaymentMethod`
/// - Cash: tender must cover the subtotal (missing tender counts as zero)
/// - Card / QR: no amount needed
pub fn validate(
    catalog: &Catalog,
    cart: &Cart,
    ledger: &Ledger,
    features: &PosFeatures,
    method_token: &str,
    tendered: Option<Money>,
) -> CoreResult<PaymentDetail> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    // record_sale must not be able to fail halfway through finalize
    for line in cart.lines() {
        catalog.check_sale(line.item_id, cart.reserved_quantity(line.item_id))?;
    }

    let subtotal = cart.subtotal();
    if ledger.total_revenue().checked_add(subtotal).is_none() {
        return Err(ValidationError::too_large("total revenue").into());
    }

    if !features.captures_payment() {
        return Ok(PaymentDetail::Unrecorded);
    }

    let method: PaymentMethod = method_token.parse()?;
    if !features.accepts(method) {
        return Err(CoreError::UnsupportedPaymentMethod(
            method_token.trim().to_string(),
        ));
    }

    match method {
        PaymentMethod::Cash => {
            let tendered = tendered.unwrap_or_default();
            if tendered < subtotal {
                return Err(CoreError::InsufficientPayment { subtotal, tendered });
            }
            Ok(PaymentDetail::Cash {
                tendered,
                change: tendered - subtotal,
            })
        }
        PaymentMethod::Card => Ok(PaymentDetail::Card),
        PaymentMethod::Qr => Ok(PaymentDetail::Qr),
    }
}

/// Validates, then commits the cart into a new ledger transaction.
///
/// On success every line is counted as sold, the cart is drained exactly
/// once, and the transaction is stamped with `now`.
pub fn checkout(
    catalog: &mut Catalog,
    cart: &mut Cart,
    ledger: &mut Ledger,
    features: &PosFeatures,
    method_token: &str,
    tendered: Option<Money>,
    now: DateTime<Utc>,
) -> CoreResult<Receipt> {
    let payment = validate(catalog, cart, ledger, features, method_token, tendered)?;

    for line in cart.lines() {
        catalog.record_sale(line.item_id, line.quantity)?;
    }

    let subtotal = cart.subtotal();
    let transaction = Transaction {
        id: Uuid::new_v4(),
        lines: cart.drain(),
        timestamp: now,
        payment,
        subtotal,
    };
    ledger.append(transaction.clone());

    let change = match payment {
        PaymentDetail::Cash { change, .. } => Some(change),
        _ => None,
    };

    Ok(Receipt {
        transaction,
        change,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::ItemId;

    struct Books {
        catalog: Catalog,
        cart: Cart,
        ledger: Ledger,
        features: PosFeatures,
        item: ItemId,
    }

    impl Books {
        fn with_features(features: PosFeatures) -> Self {
            let mut catalog = Catalog::new(features.track_inventory);
            let item = catalog
                .add_item("Choc Chip", Money::from_cents(500), 10)
                .unwrap();
            Books {
                catalog,
                cart: Cart::new(),
                ledger: Ledger::new(),
                features,
                item,
            }
        }

        fn new() -> Self {
            Self::with_features(PosFeatures::full())
        }

        fn checkout(&mut self, method: &str, tendered: Option<Money>) -> CoreResult<Receipt> {
            checkout(
                &mut self.catalog,
                &mut self.cart,
                &mut self.ledger,
                &self.features,
                method,
                tendered,
                Utc::now(),
            )
        }
    }

    #[test]
    fn test_cash_checkout_scenario() {
        let mut books = Books::new();
        books.cart.add_line(&mut books.catalog, books.item, 3).unwrap();
        assert_eq!(books.cart.subtotal(), Money::from_cents(1500));

        let receipt = books.checkout("Cash", Some(Money::from_cents(2000))).unwrap();

        assert_eq!(receipt.change, Some(Money::from_cents(500)));
        assert_eq!(books.ledger.len(), 1);
        let tx = &books.ledger.transactions()[0];
        assert_eq!(tx.lines.len(), 1);
        assert_eq!(tx.lines[0].quantity, 3);
        assert_eq!(tx.lines[0].line_total(), Money::from_cents(1500));
        assert_eq!(tx.subtotal, Money::from_cents(1500));
        assert_eq!(tx, &receipt.transaction);

        let item = books.catalog.item(books.item).unwrap();
        assert_eq!(item.sold_quantity, 3);
        assert_eq!(item.available_quantity, 7);
        assert!(books.cart.is_empty());
    }

    #[test]
    fn test_exact_cash_gives_zero_change() {
        let mut books = Books::new();
        books.cart.add_line(&mut books.catalog, books.item, 2).unwrap();

        let receipt = books.checkout("cash", Some(Money::from_cents(1000))).unwrap();
        assert_eq!(receipt.change, Some(Money::zero()));
    }

    #[test]
    fn test_insufficient_cash_changes_nothing() {
        let mut books = Books::new();
        books.cart.add_line(&mut books.catalog, books.item, 3).unwrap();
        let catalog_before = books.catalog.clone();
        let cart_before = books.cart.clone();

        let err = books.checkout("Cash", Some(Money::from_cents(1499))).unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientPayment {
                subtotal: Money::from_cents(1500),
                tendered: Money::from_cents(1499),
            }
        );
        assert_eq!(books.catalog, catalog_before);
        assert_eq!(books.cart, cart_before);
        assert!(books.ledger.is_empty());
    }

    #[test]
    fn test_cash_without_tender_is_insufficient() {
        let mut books = Books::new();
        books.cart.add_line(&mut books.catalog, books.item, 1).unwrap();

        let err = books.checkout("Cash", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientPayment);
    }

    #[test]
    fn test_card_and_qr_need_no_amount() {
        let mut books = Books::new();

        books.cart.add_line(&mut books.catalog, books.item, 1).unwrap();
        let receipt = books.checkout("Master/Visa", None).unwrap();
        assert_eq!(receipt.transaction.payment, PaymentDetail::Card);
        assert_eq!(receipt.change, None);

        books.cart.add_line(&mut books.catalog, books.item, 2).unwrap();
        let receipt = books.checkout("QR Payment", None).unwrap();
        assert_eq!(receipt.transaction.payment, PaymentDetail::Qr);

        assert_eq!(books.ledger.len(), 2);
        assert_eq!(books.catalog.item(books.item).unwrap().sold_quantity, 3);
    }

    #[test]
    fn test_empty_cart_is_rejected_before_method() {
        let mut books = Books::new();

        let err = books.checkout("Cash", Some(Money::from_cents(100))).unwrap_err();
        assert_eq!(err, CoreError::EmptyCart);
        let err = books.checkout("cheque", None).unwrap_err();
        assert_eq!(err, CoreError::EmptyCart);
        assert!(books.ledger.is_empty());
    }

    #[test]
    fn test_unknown_method_is_unsupported() {
        let mut books = Books::new();
        books.cart.add_line(&mut books.catalog, books.item, 1).unwrap();

        let err = books.checkout("cheque", None).unwrap_err();
        assert_eq!(err, CoreError::UnsupportedPaymentMethod("cheque".to_string()));
        assert_eq!(books.cart.len(), 1);
        assert!(books.ledger.is_empty());
    }

    #[test]
    fn test_disabled_method_is_unsupported() {
        let mut books = Books::with_features(PosFeatures {
            track_inventory: true,
            payment_methods: vec![PaymentMethod::Cash],
        });
        books.cart.add_line(&mut books.catalog, books.item, 1).unwrap();

        let err = books.checkout("QR", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedPaymentMethod);
    }

    #[test]
    fn test_minimal_register_records_unrecorded_payment() {
        let mut books = Books::with_features(PosFeatures::minimal());
        books.cart.add_line(&mut books.catalog, books.item, 40).unwrap();

        let receipt = books.checkout("", None).unwrap();

        assert_eq!(receipt.transaction.payment, PaymentDetail::Unrecorded);
        assert_eq!(receipt.transaction.subtotal, Money::from_cents(20_000));
        assert_eq!(books.catalog.item(books.item).unwrap().sold_quantity, 40);
    }

    #[test]
    fn test_revenue_overflow_is_refused_before_finalizing() {
        let mut books = Books::new();
        let half = Money::from_cents(i64::MAX / 2 + 1);
        let gold = books.catalog.add_item("Gold", half, 2).unwrap();

        books.cart.add_line(&mut books.catalog, gold, 1).unwrap();
        books.checkout("Card", None).unwrap();

        books.cart.add_line(&mut books.catalog, gold, 1).unwrap();
        let catalog_before = books.catalog.clone();
        let cart_before = books.cart.clone();

        let err = books.checkout("Card", None).unwrap_err();

        assert_eq!(
            err,
            CoreError::InvalidInput(ValidationError::too_large("total revenue"))
        );
        assert_eq!(books.catalog, catalog_before);
        assert_eq!(books.cart, cart_before);
        assert_eq!(books.ledger.len(), 1);
        assert_eq!(books.ledger.total_revenue(), half);
    }
}

//! # Register Context
//!
//! The one owned application context: exactly one catalog, one open cart and
//! one ledger, plus the feature flags they were built with. The presentation
//! layer constructs it once at startup and drives every operation through it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Register                                      │
//! │                                                                         │
//! │   add_item / list_items ───────────► Catalog                            │
//! │   add_to_cart / remove / cancel ───► Cart ──(reserve/release)──► Catalog│
//! │   checkout ────────────────────────► checkout::checkout ──► Ledger      │
//! │   sales_report ────────────────────► report::aggregate(Ledger)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogEntry};
use crate::checkout::{self, CheckoutPhase, Receipt};
use crate::error::CoreResult;
use crate::features::PosFeatures;
use crate::ledger::Ledger;
use crate::money::Money;
use crate::report::{self, ReportRow};
use crate::types::{CartLine, Item, ItemId};

/// Single-register bookkeeping state.
#[derive(Debug, Clone)]
pub struct Register {
    catalog: Catalog,
    cart: Cart,
    ledger: Ledger,
    features: PosFeatures,
    phase: CheckoutPhase,
}

impl Register {
    /// Creates an empty register.
    pub fn new(features: PosFeatures) -> Self {
        Register {
            catalog: Catalog::new(features.track_inventory),
            cart: Cart::new(),
            ledger: Ledger::new(),
            features,
            phase: CheckoutPhase::Idle,
        }
    }

    /// Flags this register was built with.
    pub fn features(&self) -> &PosFeatures {
        &self.features
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Adds an item to the catalog.
    pub fn add_item(&mut self, name: &str, unit_price: Money, quantity: i64) -> CoreResult<ItemId> {
        self.catalog.add_item(name, unit_price, quantity)
    }

    /// Snapshot of the catalog.
    pub fn list_items(&self) -> Vec<CatalogEntry> {
        self.catalog.list_items()
    }

    /// Looks up one item.
    pub fn item(&self, id: ItemId) -> CoreResult<&Item> {
        self.catalog.item(id)
    }

    /// Read access to the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Reserves stock and adds a cart line.
    pub fn add_to_cart(&mut self, id: ItemId, quantity: i64) -> CoreResult<()> {
        self.cart.add_line(&mut self.catalog, id, quantity)?;
        self.phase = CheckoutPhase::Idle;
        Ok(())
    }

    /// Removes the cart line at zero-based `index`, releasing its stock.
    pub fn remove_from_cart(&mut self, index: usize) -> CoreResult<CartLine> {
        let line = self.cart.remove_line(&mut self.catalog, index)?;
        self.phase = CheckoutPhase::Idle;
        Ok(line)
    }

    /// Abandons the open cart, returning all reserved stock.
    pub fn cancel(&mut self) -> CoreResult<()> {
        self.cart.cancel(&mut self.catalog)?;
        self.phase = CheckoutPhase::Idle;
        Ok(())
    }

    /// Read access to the open cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Subtotal of the open cart.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Finalizes the open cart, stamped with the current time.
    pub fn checkout(&mut self, method_token: &str, tendered: Option<Money>) -> CoreResult<Receipt> {
        self.checkout_at(method_token, tendered, Utc::now())
    }

    /// Finalizes the open cart with an explicit timestamp.
    pub fn checkout_at(
        &mut self,
        method_token: &str,
        tendered: Option<Money>,
        now: DateTime<Utc>,
    ) -> CoreResult<Receipt> {
        self.phase = CheckoutPhase::Validating;

        let result = checkout::checkout(
            &mut self.catalog,
            &mut self.cart,
            &mut self.ledger,
            &self.features,
            method_token,
            tendered,
            now,
        );

        self.phase = match &result {
            Ok(_) => CheckoutPhase::Finalized,
            Err(_) => CheckoutPhase::Rejected,
        };
        result
    }

    /// Outcome of the latest checkout attempt since the cart last changed.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Read access to the ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// One row per sold line, transaction order then line order.
    pub fn sales_report(&self) -> Vec<ReportRow> {
        report::aggregate(self.ledger.transactions())
    }
}

impl Default for Register {
    fn default() -> Self {
        Register::new(PosFeatures::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Cart
//!
//! The open, not-yet-finalized transaction.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action        Cart                  Catalog                   │
//! │  ───────────────        ────                  ───────                   │
//! │                                                                         │
//! │  Add to cart ─────────► add_line() ─────────► reserve(id, q)            │
//! │                                                                         │
//! │  Remove line ─────────► remove_line() ──────► release(id, q)            │
//! │                                                                         │
//! │  Cancel ──────────────► cancel() ───────────► release(...) per line     │
//! │                                                                         │
//! │  Checkout ────────────► drain() ────────────► (nothing: record_sale is  │
//! │                                                done by checkout)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart holds no reference to the catalog; every operation that moves
//! stock borrows it for the duration of the call.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CartLine, ItemId};

/// Ordered cart lines. The same item may appear on several lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Reserves `quantity` of item `id` and appends a line at its current price.
    ///
    /// ## Errors
    /// - `InvalidInput` if the line total or the new subtotal would not fit
    ///   in an i64; checked before anything is reserved
    /// - catalog errors from [`Catalog::reserve`], unchanged
    ///
    /// Either way the cart and the catalog are left untouched.
    pub fn add_line(
        &mut self,
        catalog: &mut Catalog,
        id: ItemId,
        quantity: i64,
    ) -> CoreResult<()> {
        let item = catalog.item(id)?;
        let line = CartLine {
            item_id: id,
            item_name: item.name.clone(),
            unit_price: item.unit_price,
            quantity,
        };

        line.checked_line_total()
            .and_then(|total| self.subtotal().checked_add(total))
            .ok_or_else(|| ValidationError::too_large("quantity"))?;

        catalog.reserve(id, quantity)?;
        self.lines.push(line);
        Ok(())
    }

    /// Removes the line at zero-based `index` and releases its quantity.
    pub fn remove_line(&mut self, catalog: &mut Catalog, index: usize) -> CoreResult<CartLine> {
        let line = self.lines.get(index).ok_or(CoreError::CartLineNotFound {
            index,
            len: self.lines.len(),
        })?;

        // Release first so a refused release leaves the line in place
        catalog.release(line.item_id, line.quantity)?;
        Ok(self.lines.remove(index))
    }

    /// Sum of line totals; zero when empty. Always exact, as
    /// [`Cart::add_line`] refuses lines that would overflow it.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Releases every line back to the catalog and empties the cart.
    ///
    /// Lines are released from the end so that, should a release be refused,
    /// the cart still holds exactly the lines whose stock is reserved.
    pub fn cancel(&mut self, catalog: &mut Catalog) -> CoreResult<()> {
        while let Some(line) = self.lines.last() {
            catalog.release(line.item_id, line.quantity)?;
            self.lines.pop();
        }
        Ok(())
    }

    /// Takes every line out of the cart without touching the catalog.
    ///
    /// Only checkout calls this, exactly once per finalized transaction.
    pub(crate) fn drain(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// Current lines, in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Quantity of `id` currently reserved by this cart.
    pub fn reserved_quantity(&self, id: ItemId) -> i64 {
        self.lines
            .iter()
            .filter(|l| l.item_id == id)
            .map(|l| l.quantity)
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn setup() -> (Catalog, Cart, ItemId) {
        let mut catalog = Catalog::default();
        let id = catalog
            .add_item("Choc Chip", Money::from_cents(500), 10)
            .unwrap();
        (catalog, Cart::new(), id)
    }

    #[test]
    fn test_add_line_reserves_and_snapshots_price() {
        let (mut catalog, mut cart, id) = setup();

        cart.add_line(&mut catalog, id, 3).unwrap();

        assert_eq!(catalog.item(id).unwrap().available_quantity, 7);
        assert_eq!(cart.subtotal(), Money::from_cents(1500));
        assert_eq!(cart.lines()[0].item_name, "Choc Chip");
        assert_eq!(cart.lines()[0].unit_price, Money::from_cents(500));
    }

    #[test]
    fn test_same_item_is_not_merged() {
        let (mut catalog, mut cart, id) = setup();

        cart.add_line(&mut catalog, id, 2).unwrap();
        cart.add_line(&mut catalog, id, 3).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.reserved_quantity(id), 5);
    }

    #[test]
    fn test_add_line_propagates_catalog_errors() {
        let (mut catalog, mut cart, id) = setup();

        let err = cart.add_line(&mut catalog, id, 15).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStock);
        let err = cart.add_line(&mut catalog, ItemId::new(4), 1).unwrap_err();
        assert_eq!(err, CoreError::ItemNotFound(ItemId::new(4)));

        assert!(cart.is_empty());
        assert_eq!(catalog.item(id).unwrap().available_quantity, 10);
    }

    #[test]
    fn test_line_total_overflow_is_refused_before_reserving() {
        let mut catalog = Catalog::default();
        let gold = catalog
            .add_item("Gold", Money::from_cents(i64::MAX), 2)
            .unwrap();
        let mut cart = Cart::new();

        let err = cart.add_line(&mut catalog, gold, 2).unwrap_err();

        assert_eq!(err, CoreError::InvalidInput(ValidationError::too_large("quantity")));
        assert!(cart.is_empty());
        assert_eq!(catalog.item(gold).unwrap().available_quantity, 2);

        // One of them still fits
        cart.add_line(&mut catalog, gold, 1).unwrap();
        assert_eq!(cart.subtotal(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_subtotal_overflow_is_refused() {
        let mut catalog = Catalog::default();
        let half = Money::from_cents(i64::MAX / 2 + 1);
        let id = catalog.add_item("Gold", half, 5).unwrap();
        let mut cart = Cart::new();
        cart.add_line(&mut catalog, id, 1).unwrap();

        let err = cart.add_line(&mut catalog, id, 1).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.subtotal(), half);
        assert_eq!(catalog.item(id).unwrap().available_quantity, 4);
    }

    #[test]
    fn test_untracked_huge_quantity_is_refused() {
        let mut catalog = Catalog::new(false);
        let id = catalog
            .add_item("Shortbread", Money::from_cents(300), 0)
            .unwrap();
        let mut cart = Cart::new();

        let err = cart.add_line(&mut catalog, id, i64::MAX).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_remove_line_releases_stock() {
        let (mut catalog, mut cart, id) = setup();
        cart.add_line(&mut catalog, id, 2).unwrap();
        cart.add_line(&mut catalog, id, 3).unwrap();

        let removed = cart.remove_line(&mut catalog, 0).unwrap();

        assert_eq!(removed.quantity, 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(catalog.item(id).unwrap().available_quantity, 7);
    }

    #[test]
    fn test_remove_line_out_of_range() {
        let (mut catalog, mut cart, id) = setup();
        cart.add_line(&mut catalog, id, 2).unwrap();

        let err = cart.remove_line(&mut catalog, 1).unwrap_err();
        assert_eq!(err, CoreError::CartLineNotFound { index: 1, len: 1 });
        assert_eq!(cart.len(), 1);
        assert_eq!(catalog.item(id).unwrap().available_quantity, 8);
    }

    #[test]
    fn test_subtotal_of_empty_cart_is_zero() {
        assert_eq!(Cart::new().subtotal(), Money::zero());
    }

    #[test]
    fn test_cancel_releases_everything_and_is_idempotent() {
        let (mut catalog, mut cart, id) = setup();
        let other = catalog
            .add_item("Oatmeal", Money::from_cents(450), 4)
            .unwrap();
        cart.add_line(&mut catalog, id, 3).unwrap();
        cart.add_line(&mut catalog, other, 4).unwrap();

        cart.cancel(&mut catalog).unwrap();
        assert!(cart.is_empty());
        assert_eq!(catalog.item(id).unwrap().available_quantity, 10);
        assert_eq!(catalog.item(other).unwrap().available_quantity, 4);

        cart.cancel(&mut catalog).unwrap();
        assert!(cart.is_empty());
        assert_eq!(catalog.item(id).unwrap().available_quantity, 10);
    }

    #[test]
    fn test_drain_leaves_catalog_alone() {
        let (mut catalog, mut cart, id) = setup();
        cart.add_line(&mut catalog, id, 3).unwrap();

        let lines = cart.drain();

        assert_eq!(lines.len(), 1);
        assert!(cart.is_empty());
        let item = catalog.item(id).unwrap();
        assert_eq!(item.available_quantity, 7);
        assert_eq!(item.sold_quantity, 0);
    }
}

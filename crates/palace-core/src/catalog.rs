//! # Catalog
//!
//! The shop's sellable items and their stock levels.
//!
//! ## Stock Accounting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where a stocked cookie can be                      │
//! │                                                                         │
//! │   stocked_quantity = available + reserved (open cart) + sold            │
//! │                                                                         │
//! │   add_to_cart ──► reserve()      available -= q   (reserved += q)       │
//! │   remove/cancel ► release()      available += q   (reserved -= q)       │
//! │   checkout ─────► record_sale()  sold += q        (reserved -= q)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! When inventory tracking is off, items carry no stock: reservations only
//! check that the item exists and releases are no-ops.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Item, ItemId};
use crate::validation::{validate_item_name, validate_quantity, validate_unit_price};

/// An item together with the id the operator uses to refer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    #[serde(flatten)]
    pub item: Item,
}

/// In-memory item list. Items are appended and never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
    track_inventory: bool,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new(track_inventory: bool) -> Self {
        Catalog {
            items: Vec::new(),
            track_inventory,
        }
    }

    /// Whether reservations are checked against stock.
    #[inline]
    pub fn tracks_inventory(&self) -> bool {
        self.track_inventory
    }

    /// Adds a new item and returns its id.
    ///
    /// ## Errors
    /// `InvalidInput` when the name is blank, too long or already taken, the
    /// price is not positive, or (with inventory tracking) the quantity is not
    /// positive. Without tracking the quantity is ignored.
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: Money,
        initial_quantity: i64,
    ) -> CoreResult<ItemId> {
        let name = validate_item_name(name)?;
        validate_unit_price(unit_price)?;

        let stocked = if self.track_inventory {
            validate_quantity(initial_quantity)?;
            initial_quantity
        } else {
            0
        };

        if self.find_by_name(&name).is_some() {
            return Err(ValidationError::Duplicate {
                field: "name".to_string(),
                value: name,
            }
            .into());
        }

        self.items.push(Item {
            name,
            unit_price,
            stocked_quantity: stocked,
            available_quantity: stocked,
            sold_quantity: 0,
        });

        Ok(ItemId::new(self.items.len()))
    }

    /// Snapshot of every item in insertion order.
    pub fn list_items(&self) -> Vec<CatalogEntry> {
        self.iter()
            .map(|(id, item)| CatalogEntry {
                id,
                item: item.clone(),
            })
            .collect()
    }

    /// Iterates items with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| (ItemId::new(idx + 1), item))
    }

    /// Looks up an item.
    pub fn item(&self, id: ItemId) -> CoreResult<&Item> {
        id.index()
            .and_then(|idx| self.items.get(idx))
            .ok_or(CoreError::ItemNotFound(id))
    }

    fn item_mut(&mut self, id: ItemId) -> CoreResult<&mut Item> {
        id.index()
            .and_then(|idx| self.items.get_mut(idx))
            .ok_or(CoreError::ItemNotFound(id))
    }

    /// Finds an item by its exact (trimmed) name.
    pub fn find_by_name(&self, name: &str) -> Option<ItemId> {
        let name = name.trim();
        self.iter()
            .find(|(_, item)| item.name == name)
            .map(|(id, _)| id)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Takes `quantity` out of availability for an open cart.
    ///
    /// ## Errors
    /// - `NotFound` if the id is out of range
    /// - `InsufficientStock` if `quantity <= 0` or exceeds availability
    pub fn reserve(&mut self, id: ItemId, quantity: i64) -> CoreResult<()> {
        let track_inventory = self.track_inventory;
        let item = self.item_mut(id)?;

        let short = quantity <= 0 || (track_inventory && quantity > item.available_quantity);
        if short {
            return Err(CoreError::InsufficientStock {
                name: item.name.clone(),
                available: item.available_quantity,
                requested: quantity,
            });
        }

        if track_inventory {
            item.available_quantity -= quantity;
        }
        Ok(())
    }

    /// Returns reserved quantity to availability.
    ///
    /// Refuses (leaving the item untouched) a release that would make more
    /// available than the shop still owns, i.e. quantity that was never
    /// reserved.
    pub fn release(&mut self, id: ItemId, quantity: i64) -> CoreResult<()> {
        let track_inventory = self.track_inventory;
        let item = self.item_mut(id)?;

        if !track_inventory {
            return Ok(());
        }

        let remaining = item.remaining_quantity();
        if quantity < 0 || quantity > remaining - item.available_quantity {
            return Err(CoreError::StockInvariant {
                name: item.name.clone(),
                available: item.available_quantity,
                released: quantity,
                remaining,
            });
        }

        item.available_quantity += quantity;
        Ok(())
    }

    /// Fails if `quantity` more of `id` could not be counted as sold.
    pub(crate) fn check_sale(&self, id: ItemId, quantity: i64) -> CoreResult<()> {
        sold_after(self.item(id)?, quantity).map(drop)
    }

    /// Counts a finalized sale. Only checkout calls this.
    pub(crate) fn record_sale(&mut self, id: ItemId, quantity: i64) -> CoreResult<()> {
        let item = self.item_mut(id)?;
        item.sold_quantity = sold_after(item, quantity)?;
        Ok(())
    }
}

fn sold_after(item: &Item, quantity: i64) -> CoreResult<i64> {
    item.sold_quantity
        .checked_add(quantity)
        .ok_or_else(|| ValidationError::too_large("sold quantity").into())
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # palace-core: Pure Bookkeeping for Palace POS
//!
//! This crate is the **heart** of Palace POS. It owns the in-memory catalog,
//! the open cart, checkout rules and the sales ledger, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Palace POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 palace-register (terminal)                      │    │
//! │  │   items ──► add ──► pay ──► report (CSV)                        │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ Register operations                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ palace-core (THIS CRATE) ★                      │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐        │    │
//! │  │   │ catalog  │  │   cart   │  │ checkout │  │  ledger  │        │    │
//! │  │   │  Item    │◄─│ CartLine │  │  Receipt │─►│  report  │        │    │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘        │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO LOGGING • NO FLOATS                               │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Item, CartLine, Transaction, PaymentMethod
//! - [`catalog`] - Items and stock reservation
//! - [`cart`] - The open transaction
//! - [`checkout`] - Payment validation and finalize
//! - [`ledger`] - Append-only sales history
//! - [`report`] - Sales report rows
//! - [`register`] - The single owned context tying it all together
//! - [`features`] - Full vs. minimal register behaviour
//! - [`error`] / [`validation`] - Typed errors and input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use palace_core::{Money, Register};
//!
//! let mut register = Register::default();
//! let choc = register.add_item("Choc Chip", Money::from_cents(500), 10).unwrap();
//!
//! register.add_to_cart(choc, 3).unwrap();
//! assert_eq!(register.subtotal(), Money::from_cents(1500));
//!
//! let receipt = register.checkout("Cash", Some("20.00".parse().unwrap())).unwrap();
//! assert_eq!(receipt.change, Some(Money::from_cents(500)));
//! assert_eq!(register.item(choc).unwrap().sold_quantity, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod features;
pub mod ledger;
pub mod money;
pub mod register;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{Catalog, CatalogEntry};
pub use checkout::{CheckoutPhase, Receipt};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use features::PosFeatures;
pub use ledger::Ledger;
pub use money::Money;
pub use register::Register;
pub use report::ReportRow;
pub use types::*;

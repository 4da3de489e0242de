//! # Error Types
//!
//! Domain-specific error types for palace-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  palace-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog / cart / checkout failures              │
//! │  └── ValidationError  - Malformed input fields                          │
//! │                                                                         │
//! │  palace-register errors (app)                                           │
//! │  └── CommandError     - What the operator sees (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CommandError → terminal            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item, quantities, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every error leaves the register state exactly as it was

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;
use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the catalog, cart and checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed add-item fields, amounts or names.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Item id is outside the catalog.
    #[error("Item not found: #{0}")]
    ItemNotFound(ItemId),

    /// Cart line index is outside the cart.
    #[error("Cart line {index} not found (cart has {len} lines)")]
    CartLineNotFound { index: usize, len: usize },

    /// Reservation exceeds availability, or asks for a non-positive quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (item #1, qty: 15)
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Choc Chip", available: 10, requested: 15 }
    ///      │
    ///      ▼
    /// Operator sees: "Only 10 Choc Chip available"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout attempted with nothing in the cart.
    #[error("The cart is empty")]
    EmptyCart,

    /// Cash tendered does not cover the subtotal.
    #[error("Insufficient payment: subtotal {subtotal}, tendered {tendered}")]
    InsufficientPayment { subtotal: Money, tendered: Money },

    /// Payment method token is unknown or disabled.
    #[error("Unsupported payment method: {0}")]
    UnsupportedPaymentMethod(String),

    /// A release would push availability past what is left of the stock.
    ///
    /// Only reachable if a caller releases quantity it never reserved.
    #[error(
        "Releasing {released} of {name} would exceed remaining stock \
         ({available} available, {remaining} remaining)"
    )]
    StockInvariant {
        name: String,
        available: i64,
        released: i64,
        remaining: i64,
    },
}

/// Coarse error categories the presentation layer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    InsufficientStock,
    EmptyCart,
    InsufficientPayment,
    UnsupportedPaymentMethod,
    StockInvariant,
}

impl CoreError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidInput(_) => ErrorKind::InvalidInput,
            CoreError::ItemNotFound(_) | CoreError::CartLineNotFound { .. } => {
                ErrorKind::NotFound
            }
            CoreError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CoreError::EmptyCart => ErrorKind::EmptyCart,
            CoreError::InsufficientPayment { .. } => ErrorKind::InsufficientPayment,
            CoreError::UnsupportedPaymentMethod(_) => ErrorKind::UnsupportedPaymentMethod,
            CoreError::StockInvariant { .. } => ErrorKind::StockInvariant,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Invalid format (e.g., not a decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (item names are the catalog key).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// An amount or count that does not fit the register's i64 arithmetic.
    pub fn too_large(field: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "amount is too large".to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

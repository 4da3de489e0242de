//! # Validation Module
//!
//! Input validation for the add-item form and amounts entered at checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (palace-register)                                │
//! │  ├── Tokenizing, integer / decimal parsing                              │
//! │  └── Immediate operator feedback                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  └── Business rule validation before any state is touched               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog / Cart                                                │
//! │  └── Stock checks, uniqueness, id ranges                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use palace_core::validation::{validate_item_name, validate_quantity};
//!
//! assert_eq!(validate_item_name("  Choc Chip ").unwrap(), "Choc Chip");
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest item name accepted.
pub const MAX_ITEM_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Free items are not sold here, so zero is rejected.
///
/// ## Example
/// ```rust
/// use palace_core::money::Money;
/// use palace_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(500)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity (stock on add-item).
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Feature Flags
//!
//! One core serves both register variants:
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │  full()                      │  minimal()                               │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │  stock tracked per item      │  items carry no stock                    │
//! │  Cash / Master/Visa / QR     │  no tender captured                      │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::PaymentMethod;

/// Optional behaviour of the register core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosFeatures {
    /// Reserve stock on add-to-cart and refuse to oversell.
    #[serde(default = "default_true")]
    pub track_inventory: bool,

    /// Accepted tender methods. Empty disables payment capture entirely.
    #[serde(default = "default_payment_methods")]
    pub payment_methods: Vec<PaymentMethod>,
}

fn default_true() -> bool {
    true
}

fn default_payment_methods() -> Vec<PaymentMethod> {
    PaymentMethod::ALL.to_vec()
}

impl PosFeatures {
    /// Stock tracking plus every payment method.
    pub fn full() -> Self {
        PosFeatures {
            track_inventory: true,
            payment_methods: default_payment_methods(),
        }
    }

    /// Price list only: no stock, no tender.
    pub fn minimal() -> Self {
        PosFeatures {
            track_inventory: false,
            payment_methods: Vec::new(),
        }
    }

    /// Whether checkout asks for a payment method at all.
    #[inline]
    pub fn captures_payment(&self) -> bool {
        !self.payment_methods.is_empty()
    }

    /// Whether `method` is accepted at checkout.
    pub fn accepts(&self, method: PaymentMethod) -> bool {
        self.payment_methods.contains(&method)
    }
}

impl Default for PosFeatures {
    fn default() -> Self {
        PosFeatures::full()
    }
}

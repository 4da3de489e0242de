//! # Register Error Types
//!
//! What the operator sees when a command fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  operator types `add 1 15`                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Session::execute                                                │   │
//! │  │  Result<Outcome, CommandError>                                   │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Parse error? ──── clap::Error ──────────────────┐               │   │
//! │  │         │                                        │               │   │
//! │  │         ▼                                        ▼               │   │
//! │  │  Core rejects? ─── CoreError::InsufficientStock ─► CommandError  │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Export fails? ─── ExportError::Io ──────────────► CommandError  │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Printed: [INSUFFICIENT_STOCK] Only 10 Choc Chip available, ...         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure carries a machine-readable `code` (also logged) and a
//! human-readable `message`.

use std::fmt;
use std::path::PathBuf;

use palace_core::{CoreError, ErrorKind};
use thiserror::Error;

/// A failed operator command.
///
/// Rendered for the operator as `[NOT_FOUND] Item not found: #7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for failed commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Item id or cart line not found
    NotFound,

    /// Operator input rejected (bad name, price, quantity, command syntax)
    ValidationError,

    /// Cart operation failed (empty cart, stock bookkeeping)
    CartError,

    /// Requested more than is available
    InsufficientStock,

    /// Tender or payment method rejected
    PaymentError,

    /// Anything else (file system, serialization)
    Internal,
}

impl ErrorCode {
    /// Name shown in brackets before the message and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::PaymentError => "PAYMENT_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CommandError {
    /// Creates a new command error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors into operator messages.
impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        let code = match err.kind() {
            ErrorKind::InvalidInput => ErrorCode::ValidationError,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::InsufficientStock => ErrorCode::InsufficientStock,
            ErrorKind::EmptyCart | ErrorKind::StockInvariant => ErrorCode::CartError,
            ErrorKind::InsufficientPayment | ErrorKind::UnsupportedPaymentMethod => {
                ErrorCode::PaymentError
            }
        };

        let message = match err {
            CoreError::InvalidInput(e) => e.to_string(),
            CoreError::InsufficientStock {
                name,
                available,
                requested,
            } if requested <= 0 => format!(
                "Quantity must be greater than 0 ({} has {} available)",
                name, available
            ),
            CoreError::InsufficientStock {
                name,
                available,
                requested,
            } => format!(
                "Only {} {} available, {} requested",
                available, name, requested
            ),
            CoreError::EmptyCart => "The cart is empty. Add items to the cart first.".to_string(),
            CoreError::InsufficientPayment { subtotal, tendered } => format!(
                "Insufficient cash amount: subtotal {}, tendered {}",
                subtotal, tendered
            ),
            CoreError::UnsupportedPaymentMethod(method) => {
                format!("Invalid payment method: '{}'", method)
            }
            other => other.to_string(),
        };

        CommandError { code, message }
    }
}

impl From<ExportError> for CommandError {
    fn from(err: ExportError) -> Self {
        tracing::error!(error = %err, "Sales report export failed");
        CommandError::internal(err.to_string())
    }
}

impl From<clap::Error> for CommandError {
    fn from(err: clap::Error) -> Self {
        // clap renders its own usage hint; keep the first line for the prompt
        let rendered = err.to_string();
        let first = rendered
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("invalid command")
            .trim_start_matches("error: ")
            .to_string();
        CommandError::validation(first)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading `palace.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Export Error
// =============================================================================

/// Errors raised while writing the sales report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Report directory {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error("Failed to write sales report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write sales report: {0}")]
    Csv(#[from] csv::Error),
}

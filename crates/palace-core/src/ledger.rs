//! # Ledger
//!
//! Append-only history of finalized transactions. Only checkout appends;
//! everything else reads.

use serde::Serialize;
use uuid::Uuid;

use crate::money::Money;
use crate::types::Transaction;

/// Finalized transactions in the order they were completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
        }
    }

    pub(crate) fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Every transaction, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Looks up a transaction by receipt id.
    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether nothing has been sold yet.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of every transaction's subtotal.
    ///
    /// Checkout refuses a sale that would push this past `i64::MAX` sen, so
    /// the saturating [`Sum`](std::iter::Sum) never clamps here.
    pub fn total_revenue(&self) -> Money {
        self.transactions.iter().map(|t| t.subtotal).sum()
    }
}

//! # Reporting
//!
//! Flattens the ledger into one row per sold line for export.
//!
//! ```text
//! Transaction 1 ─┬─ line A ──► row 1
//!                └─ line B ──► row 2
//! Transaction 2 ─── line C ──► row 3
//! ```
//!
//! Row order is a guarantee: transaction order, then line order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Transaction;

/// One sold line, as it appears in the sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub item_name: String,
    pub quantity: i64,
    pub line_total: Money,
    pub timestamp: DateTime<Utc>,
}

/// Rows for every line of every transaction. Empty when nothing was sold;
/// the caller decides how to tell the operator.
pub fn aggregate(transactions: &[Transaction]) -> Vec<ReportRow> {
    transactions
        .iter()
        .flat_map(|tx| {
            tx.lines.iter().map(move |line| ReportRow {
                item_name: line.item_name.clone(),
                quantity: line.quantity,
                line_total: line.line_total(),
                timestamp: tx.timestamp,
            })
        })
        .collect()
}

/// Grand total of a report.
///
/// Rows built from one ledger always fit; arbitrary rows may not, and then
/// the total is refused rather than wrapped.
pub fn report_total(rows: &[ReportRow]) -> CoreResult<Money> {
    Money::checked_sum(rows.iter().map(|r| r.line_total))
        .ok_or_else(|| ValidationError::too_large("report total").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CartLine, ItemId, PaymentDetail};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn line(name: &str, cents: i64, quantity: i64) -> CartLine {
        CartLine {
            item_id: ItemId::new(1),
            item_name: name.to_string(),
            unit_price: Money::from_cents(cents),
            quantity,
        }
    }

    fn transaction(lines: Vec<CartLine>, hour: u32) -> Transaction {
        let subtotal = lines.iter().map(CartLine::line_total).sum();
        Transaction {
            id: Uuid::new_v4(),
            lines,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            payment: PaymentDetail::Card,
            subtotal,
        }
    }

    #[test]
    fn test_empty_ledger_gives_no_rows() {
        assert!(aggregate(&[]).is_empty());
        assert_eq!(report_total(&[]), Ok(Money::zero()));
    }

    #[test]
    fn test_rows_follow_transaction_then_line_order() {
        let ledger = vec![
            transaction(vec![line("Choc Chip", 500, 3), line("Oatmeal", 450, 1)], 9),
            transaction(vec![line("Shortbread", 300, 2)], 10),
        ];

        let rows = aggregate(&ledger);

        let names: Vec<_> = rows.iter().map(|r| r.item_name.as_str()).collect();
        assert_eq!(names, ["Choc Chip", "Oatmeal", "Shortbread"]);
        assert_eq!(rows[0].line_total, Money::from_cents(1500));
        assert_eq!(rows[0].timestamp, ledger[0].timestamp);
        assert_eq!(rows[2].timestamp, ledger[1].timestamp);
        assert_eq!(report_total(&rows), Ok(Money::from_cents(2550)));
    }

    #[test]
    fn test_total_of_oversized_rows_is_refused() {
        let ledger = vec![
            transaction(vec![line("Gold", i64::MAX, 1)], 9),
            transaction(vec![line("Gold", i64::MAX, 1)], 10),
        ];

        let rows = aggregate(&ledger);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            report_total(&rows).unwrap_err().kind(),
            crate::error::ErrorKind::InvalidInput
        );
    }
}

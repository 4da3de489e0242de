//! Plain-text rendering of core snapshots.

use std::fmt::Write;

use chrono::Local;
use palace_core::{Cart, CatalogEntry, Ledger, PaymentDetail, Receipt};

use crate::config::RegisterConfig;
use crate::export::DATE_FORMAT;

/// Catalog table. Stock columns only appear when inventory is tracked.
pub fn items_table(entries: &[CatalogEntry], config: &RegisterConfig) -> String {
    if entries.is_empty() {
        return "No items yet. Use add-item to stock the shop.".to_string();
    }

    let track = config.features.track_inventory;
    let mut out = String::new();
    if track {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>12} {:>9} {:>6}",
            "ID", "Name", "Price", "Available", "Sold"
        );
    } else {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>12} {:>6}",
            "ID", "Name", "Price", "Sold"
        );
    }

    for entry in entries {
        let item = &entry.item;
        let price = config.format_currency(item.unit_price);
        if track {
            let _ = writeln!(
                out,
                "{:>4}  {:<24} {:>12} {:>9} {:>6}",
                entry.id, item.name, price, item.available_quantity, item.sold_quantity
            );
        } else {
            let _ = writeln!(
                out,
                "{:>4}  {:<24} {:>12} {:>6}",
                entry.id, item.name, price, item.sold_quantity
            );
        }
    }

    out.trim_end().to_string()
}

/// Cart lines, numbered from 1, followed by the subtotal.
pub fn cart_table(cart: &Cart, config: &RegisterConfig) -> String {
    let mut out = String::new();

    if cart.is_empty() {
        out.push_str("Cart is empty.\n");
    } else {
        let _ = writeln!(
            out,
            "{:>3}  {:<24} {:>5} {:>12} {:>12}",
            "#", "Item", "Qty", "Unit", "Total"
        );
        for (n, line) in cart.lines().iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}  {:<24} {:>5} {:>12} {:>12}",
                n + 1,
                line.item_name,
                line.quantity,
                config.format_currency(line.unit_price),
                config.format_currency(line.line_total())
            );
        }
    }

    out.push_str(&subtotal_line(cart, config));
    out
}

pub fn subtotal_line(cart: &Cart, config: &RegisterConfig) -> String {
    format!("Subtotal: {}", config.format_currency(cart.subtotal()))
}

/// What the operator tells the customer after a successful checkout.
pub fn receipt_message(receipt: &Receipt, config: &RegisterConfig) -> String {
    let tx = &receipt.transaction;
    let headline = match (tx.payment, tx.payment.method()) {
        (PaymentDetail::Cash { change, .. }, _) => {
            format!("Payment successful! Change: {}", config.format_currency(change))
        }
        (_, Some(method)) => format!("Payment successful via {}.", method),
        (_, None) => format!("Sale recorded: {}", config.format_currency(tx.subtotal)),
    };

    format!("{}\nReceipt {}", headline, tx.id)
}

/// One line per finalized transaction plus total revenue.
pub fn history_table(ledger: &Ledger, config: &RegisterConfig) -> String {
    if ledger.is_empty() {
        return "No transactions yet.".to_string();
    }

    let mut out = String::new();
    for (n, tx) in ledger.transactions().iter().enumerate() {
        let method = tx
            .payment
            .method()
            .map(|m| m.label())
            .unwrap_or("-");
        let _ = writeln!(
            out,
            "{:>3}  {}  {:<12} {:>4} pcs {:>12}  {}",
            n + 1,
            tx.timestamp.with_timezone(&Local).format(DATE_FORMAT),
            method,
            tx.total_quantity(),
            config.format_currency(tx.subtotal),
            tx.id
        );
    }
    let revenue = config.format_currency(ledger.total_revenue());
    let _ = write!(out, "Total revenue: {}", revenue);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use palace_core::{Money, PosFeatures, Register};

    fn stocked() -> (Register, RegisterConfig) {
        let mut register = Register::default();
        register.add_item("Choc Chip", Money::from_cents(500), 10).unwrap();
        register.add_item("Oatmeal", Money::from_cents(450), 5).unwrap();
        (register, RegisterConfig::default())
    }

    #[test]
    fn test_items_table() {
        let (mut register, config) = stocked();
        register.add_to_cart(palace_core::ItemId::new(1), 3).unwrap();

        let table = items_table(&register.list_items(), &config);
        let rows: Vec<&str> = table.lines().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("Available"));
        assert!(rows[1].contains("Choc Chip"));
        assert!(rows[1].contains("RM 5.00"));
        assert!(rows[1].contains(" 7 "));
    }

    #[test]
    fn test_items_table_without_stock() {
        let mut config = RegisterConfig::default();
        config.features = PosFeatures::minimal();
        let mut register = Register::new(PosFeatures::minimal());
        register.add_item("Shortbread", Money::from_cents(300), 0).unwrap();

        let table = items_table(&register.list_items(), &config);
        assert!(!table.contains("Available"));
        assert!(table.contains("Shortbread"));
    }

    #[test]
    fn test_empty_cart() {
        let (register, config) = stocked();
        assert_eq!(
            cart_table(register.cart(), &config),
            "Cart is empty.\nSubtotal: RM 0.00"
        );
    }

    #[test]
    fn test_receipt_messages() {
        let (mut register, config) = stocked();
        let choc = palace_core::ItemId::new(1);

        register.add_to_cart(choc, 3).unwrap();
        let receipt = register.checkout("cash", Some(Money::from_cents(2000))).unwrap();
        let message = receipt_message(&receipt, &config);
        assert!(message.starts_with("Payment successful! Change: RM 5.00"));

        register.add_to_cart(choc, 1).unwrap();
        let receipt = register.checkout("card", None).unwrap();
        let message = receipt_message(&receipt, &config);
        assert!(message.starts_with("Payment successful via Master/Visa."));

        let history = history_table(register.ledger(), &config);
        assert_eq!(history.lines().count(), 3);
        assert!(history.ends_with("Total revenue: RM 20.00"));
    }
}

//! # Register Session
//!
//! Owns the one `Register` for the lifetime of the process and turns
//! operator commands into core operations.
//!
//! ## Command Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin line ──► parse_line ──► Session::execute ──► Reply ──► stdout    │
//! │                     │                  │                                │
//! │                     ▼                  ▼                                │
//! │               CommandError ◄──── CoreError / ExportError                │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │             "Error: [CODE] message"   (session keeps running)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use chrono::Local;
use palace_core::{report, CoreError, ItemId, Money, Register, ValidationError};
use tracing::{debug, info, warn};

use crate::commands::{self, Command};
use crate::config::RegisterConfig;
use crate::display;
use crate::error::{CommandError, ErrorCode};
use crate::export;

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the operator (may be empty).
    Text(String),
    /// The operator asked to leave.
    Quit,
}

/// Cookies stocked by `--demo`.
const DEMO_ITEMS: [(&str, i64, i64); 4] = [
    ("Choc Chip", 500, 10),
    ("Oatmeal Raisin", 450, 12),
    ("Double Chocolate", 600, 8),
    ("Shortbread", 300, 20),
];

/// A running register.
#[derive(Debug)]
pub struct Session {
    register: Register,
    config: RegisterConfig,
}

impl Session {
    /// Starts an empty register with the configured features.
    pub fn new(config: RegisterConfig) -> Self {
        Session {
            register: Register::new(config.features.clone()),
            config,
        }
    }

    /// Stocks a handful of cookies.
    pub fn seed_demo(&mut self) -> Result<(), CoreError> {
        for (name, cents, quantity) in DEMO_ITEMS {
            self.register
                .add_item(name, Money::from_cents(cents), quantity)?;
        }
        info!(items = DEMO_ITEMS.len(), "Demo catalog loaded");
        Ok(())
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Parses and executes one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Reply, CommandError> {
        match commands::parse_line(line)? {
            Some(command) => self.execute(command),
            None => Ok(Reply::Text(String::new())),
        }
    }

    /// Executes one command. Rejections are logged and leave state unchanged.
    pub fn execute(&mut self, command: Command) -> Result<Reply, CommandError> {
        debug!(?command, "Executing command");

        let result = self.dispatch(command);
        if let Err(err) = &result {
            warn!(code = %err.code, message = %err.message, "Command rejected");
        }
        result
    }

    fn dispatch(&mut self, command: Command) -> Result<Reply, CommandError> {
        let text = match command {
            Command::Items => display::items_table(&self.register.list_items(), &self.config),
            Command::AddItem {
                name,
                price,
                quantity,
            } => self.add_item(&name, &price, quantity)?,
            Command::Cart => display::cart_table(self.register.cart(), &self.config),
            Command::Add { item, quantity } => {
                self.register.add_to_cart(ItemId::new(item), quantity)?;
                let line = self.register.cart().lines().last();
                let name = line.map(|l| l.item_name.as_str()).unwrap_or_default();
                format!(
                    "Added {} x {}\n{}",
                    quantity,
                    name,
                    display::subtotal_line(self.register.cart(), &self.config)
                )
            }
            Command::Remove { line } => {
                let index = line.checked_sub(1).ok_or_else(|| {
                    CommandError::new(ErrorCode::NotFound, "Cart lines are numbered from 1")
                })?;
                let removed = self.register.remove_from_cart(index)?;
                format!(
                    "Removed {} x {}\n{}",
                    removed.quantity,
                    removed.item_name,
                    display::subtotal_line(self.register.cart(), &self.config)
                )
            }
            Command::Cancel => {
                self.register.cancel()?;
                info!("Transaction canceled");
                "The transaction has been canceled.".to_string()
            }
            Command::Pay { method, amount } => self.pay(method, amount)?,
            Command::History { json } => {
                if json {
                    serde_json::to_string_pretty(self.register.ledger())
                        .map_err(|e| CommandError::internal(e.to_string()))?
                } else {
                    display::history_table(self.register.ledger(), &self.config)
                }
            }
            Command::Report { dir } => {
                let dir = dir.unwrap_or_else(|| self.config.report.dir.clone());
                self.report(&dir)?
            }
            Command::Help => commands::help_text(),
            Command::Quit => return Ok(Reply::Quit),
        };

        Ok(Reply::Text(text))
    }

    fn add_item(
        &mut self,
        name: &str,
        price: &str,
        quantity: Option<i64>,
    ) -> Result<String, CommandError> {
        let price = Money::parse(price, "price").map_err(CoreError::from)?;
        let quantity = match quantity {
            Some(q) => q,
            None if self.config.features.track_inventory => {
                return Err(CoreError::from(ValidationError::Required {
                    field: "quantity".to_string(),
                })
                .into());
            }
            None => 0,
        };

        let id = self.register.add_item(name, price, quantity)?;
        let item = self.register.item(id)?;
        info!(item_id = %id, name = %item.name, "Item added");
        Ok(format!("Item '{}' added successfully as #{}.", item.name, id))
    }

    fn pay(
        &mut self,
        method: Option<String>,
        amount: Option<String>,
    ) -> Result<String, CommandError> {
        let tendered = amount
            .as_deref()
            .map(|a| Money::parse(a, "amount"))
            .transpose()
            .map_err(CoreError::from)?;

        let receipt = self
            .register
            .checkout(method.as_deref().unwrap_or_default(), tendered)?;

        info!(
            receipt = %receipt.transaction.id,
            subtotal = %receipt.transaction.subtotal,
            lines = receipt.transaction.lines.len(),
            "Sale completed"
        );
        Ok(display::receipt_message(&receipt, &self.config))
    }

    fn report(&self, dir: &std::path::Path) -> Result<String, CommandError> {
        let rows = self.register.sales_report();
        if rows.is_empty() {
            return Ok("No transactions to report.".to_string());
        }

        let total = report::report_total(&rows)?;
        let path = export::write_sales_report(&rows, dir, Local::now())?;
        Ok(format!(
            "Sales report saved as {} ({} rows, {}).",
            path.display(),
            rows.len(),
            self.config.format_currency(total)
        ))
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "Welcome to {}. Type `help` for commands.", self.config.store.name)?;

        let mut lines = input.lines();
        loop {
            write!(output, "[{}] palace> ", Local::now().format(export::DATE_FORMAT))?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };

            match self.handle_line(&line?) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Text(text)) if text.is_empty() => {}
                Ok(Reply::Text(text)) => writeln!(output, "{}", text)?,
                Err(err) => writeln!(output, "Error: {}", err)?,
            }
        }

        info!(
            transactions = self.register.ledger().len(),
            "Register closed"
        );
        writeln!(output, "Goodbye.")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

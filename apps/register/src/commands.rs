//! # Operator Commands
//!
//! One command per input line. Lines are split into words (double quotes
//! keep spaces together) and parsed by clap.
//!
//! ```text
//! palace> add-item "Choc Chip" 5.00 10
//! palace> add 1 3
//! palace> pay cash 20
//! palace> report
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::error::CommandError;

#[derive(Debug, Parser)]
#[command(
    name = "palace",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true,
    help_template = "Commands:\n{subcommands}"
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

/// Everything the operator can do at the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List catalog items
    #[command(visible_alias = "ls")]
    Items,

    /// Add an item: add-item <NAME> <PRICE> [QUANTITY]
    AddItem {
        name: String,
        price: String,
        /// Opening stock (ignored when inventory is not tracked)
        #[arg(allow_negative_numbers = true)]
        quantity: Option<i64>,
    },

    /// Show the open cart
    Cart,

    /// Put an item in the cart: add <ITEM_ID> <QUANTITY>
    Add {
        item: usize,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Take a line out of the cart: remove <LINE>
    #[command(visible_alias = "rm")]
    Remove { line: usize },

    /// Abandon the open cart
    Cancel,

    /// Check out: pay <cash|card|qr> [AMOUNT]
    Pay {
        method: Option<String>,
        amount: Option<String>,
    },

    /// List finalized transactions
    History {
        /// Print the ledger as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the sales report CSV: report [DIR]
    Report { dir: Option<PathBuf> },

    /// Show this list
    Help,

    /// Leave the register
    #[command(visible_alias = "exit")]
    Quit,
}

/// Parses one input line. Blank lines give `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }

    let parsed = CommandLine::try_parse_from(words)?;
    Ok(Some(parsed.command))
}

/// Rendered command list for `help`.
pub fn help_text() -> String {
    CommandLine::command().render_help().to_string()
}

/// Splits a line on whitespace; `"..."` groups words and may be empty.
pub fn split_words(line: &str) -> Result<Vec<String>, CommandError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(CommandError::validation("Unterminated quote"));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  add   1 3 ").unwrap(), ["add", "1", "3"]);
        assert_eq!(
            split_words(r#"add-item "Choc Chip" 5.00 10"#).unwrap(),
            ["add-item", "Choc Chip", "5.00", "10"]
        );
        assert_eq!(split_words(r#"add-item "" 5"#).unwrap(), ["add-item", "", "5"]);
        assert!(split_words("").unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_quote() {
        let err = split_words(r#"add-item "Choc Chip 5"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("items").unwrap(), Some(Command::Items));
        assert_eq!(parse_line("ls").unwrap(), Some(Command::Items));
        assert_eq!(
            parse_line(r#"add-item "Double Chocolate" 6 8"#).unwrap(),
            Some(Command::AddItem {
                name: "Double Chocolate".into(),
                price: "6".into(),
                quantity: Some(8),
            })
        );
        assert_eq!(
            parse_line("add 1 -2").unwrap(),
            Some(Command::Add {
                item: 1,
                quantity: -2
            })
        );
        assert_eq!(
            parse_line(r#"pay "QR Payment""#).unwrap(),
            Some(Command::Pay {
                method: Some("QR Payment".into()),
                amount: None,
            })
        );
        assert_eq!(
            parse_line("history --json").unwrap(),
            Some(Command::History { json: true })
        );
        assert_eq!(parse_line("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors_are_validation_errors() {
        for line in ["dance", "add one 3", "add 1", "remove"] {
            let err = parse_line(line).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{line}");
            assert!(!err.message.is_empty());
        }
    }

    #[test]
    fn test_help_lists_commands() {
        let help = help_text();
        for name in ["items", "add-item", "pay", "report", "quit"] {
            assert!(help.contains(name), "missing {name}");
        }
    }
}

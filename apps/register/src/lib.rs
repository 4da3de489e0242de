//! # Palace Register Library
//!
//! The terminal register for The Cookie Palace: a thin presentation layer
//! over `palace-core`.
//!
//! ## Module Organization
//! ```text
//! palace_register/
//! ├── lib.rs          ◄─── You are here (tracing setup & run)
//! ├── config.rs       ◄─── palace.toml + PALACE_* overrides
//! ├── commands.rs     ◄─── Per-line command grammar (clap)
//! ├── session.rs      ◄─── Owns the Register, executes commands
//! ├── display.rs      ◄─── Text tables for items, cart, history
//! ├── export.rs       ◄─── CSV sales report
//! └── error.rs        ◄─── CommandError, ConfigError, ExportError
//! ```
//!
//! ## State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Session                                       │
//! │                                                                         │
//! │  ┌──────────────────────────────────┐  ┌──────────────────────────────┐ │
//! │  │  palace_core::Register           │  │  RegisterConfig              │ │
//! │  │  • Catalog (items, stock)        │  │  • Store name, currency      │ │
//! │  │  • Cart (open transaction)       │  │  • Features                  │ │
//! │  │  • Ledger (finalized sales)      │  │  • Report dir                │ │
//! │  └──────────────────────────────────┘  └──────────────────────────────┘ │
//! │                                                                         │
//! │  Single owner, single thread: no locks.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod session;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::RegisterConfig;
pub use error::{CommandError, ConfigError, ErrorCode, ExportError};
pub use session::{Reply, Session};

/// Runs the register on stdin/stdout until `quit` or end of input.
///
/// ## Startup Sequence
/// 1. Build the session from the loaded config
/// 2. Optionally stock the demo catalog
/// 3. Read commands until quit
pub fn run(config: RegisterConfig, demo: bool) -> anyhow::Result<()> {
    info!(
        store = %config.store.name,
        track_inventory = config.features.track_inventory,
        payment_methods = ?config.features.payment_methods,
        report_dir = ?config.report.dir,
        "Starting register"
    );

    let mut session = Session::new(config);
    if demo {
        session.seed_demo()?;
    }

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout())?;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - ERROR: export failures
/// - WARN: rejected commands
/// - INFO: startup, completed sales, reports
/// - DEBUG: every command
///
/// Logs go to stderr so they never interleave with the prompt on stdout.
/// Override with `RUST_LOG`, e.g. `RUST_LOG=warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,palace=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

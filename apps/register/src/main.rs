//! # Palace Register Entry Point
//!
//! ## Startup Sequence
//! 1. Parse flags
//! 2. Initialize tracing (logging)
//! 3. Load config: defaults, palace.toml, PALACE_* env, then flags
//! 4. Run the command loop

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use palace_core::PosFeatures;
use palace_register::RegisterConfig;

#[derive(Parser)]
#[command(name = "palace-register")]
#[command(about = "Point-of-sale register for The Cookie Palace")]
#[command(version)]
struct Cli {
    /// Config file (default: platform config dir/palace.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Price-list register: no stock tracking, no tender
    #[arg(long)]
    minimal: bool,

    /// Directory for sales report CSV files
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Start with a few cookies in the catalog
    #[arg(long)]
    demo: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    palace_register::init_tracing();

    let mut config = RegisterConfig::load(cli.config).context("Failed to load configuration")?;
    if cli.minimal {
        config.features = PosFeatures::minimal();
    }
    if let Some(dir) = cli.report_dir {
        config.report.dir = dir;
    }

    palace_register::run(config, cli.demo)
}

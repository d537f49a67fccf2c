//! # kart: Shopping Cart CLI
//!
//! ## Invocation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing (stderr, RUST_LOG or "warn")                 │
//! │  2. Parse arguments, load settings (file → env → flags)             │
//! │  3. Open FileStore at the data directory                            │
//! │  4. CartEngine::load: read snapshot or fall back to the catalog     │
//! │  5. Apply --discount (never persisted)                              │
//! │  6. Run the subcommand (default: show)                              │
//! │  7. Print table or JSON to stdout                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod render;
mod settings;

use anyhow::Context;
use kart_core::CartEngine;
use kart_store::FileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::{CommandLine, Commands};
use crate::settings::Settings;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = CommandLine::parse_args();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir.clone() {
        settings.data_dir = Some(dir);
    }

    let data_dir = settings.resolve_data_dir()?;
    let store = FileStore::open(data_dir.clone())
        .with_context(|| format!("opening data directory {}", data_dir.display()))?;

    let mut engine = CartEngine::load(settings.cart.clone(), store);
    info!(items = engine.items().len(), "Cart loaded");

    if let Some(discount) = &cli.discount {
        engine.set_discount_input(discount.as_str());
    }

    let command = cli.command.clone().unwrap_or(Commands::Show);
    let outcome = commands::run(&mut engine, &command);
    let totals = engine.totals();

    let output = if cli.json {
        render::json(engine.state(), totals, outcome)?
    } else if command == Commands::Totals {
        render::summary(engine.state(), &totals)
    } else {
        render::table(engine.state(), &totals)
    };

    print!("{}", output);
    if cli.json {
        println!();
    }

    Ok(())
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,kart=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! # CLI Commands
//!
//! ```text
//! kart [--discount <pct>] [--json] show
//! kart set-qty <id> <quantity>
//! kart remove <id>
//! kart totals
//! ```
//!
//! The discount is not persisted, so it is a flag on every invocation rather
//! than a subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kart_core::{CartEngine, ItemId, KeyValueStore};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "kart", version, about = "Shopping cart with a persisted snapshot")]
pub struct CommandLine {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the cart snapshot
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Discount percentage to apply to this view (0-100)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub discount: Option<String>,

    /// Print the cart as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        CommandLine::parse()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show items and totals
    Show,

    /// Change the quantity of one item
    SetQty {
        id: i64,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Remove one item
    Remove { id: i64 },

    /// Show totals only
    Totals,
}

/// What a command did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Viewed,
    Changed,
    Unchanged,
}

/// Runs one command against the engine.
pub fn run<S: KeyValueStore>(engine: &mut CartEngine<S>, command: &Commands) -> Outcome {
    debug!(?command, "Running command");

    match command {
        Commands::Show | Commands::Totals => Outcome::Viewed,
        Commands::SetQty { id, quantity } => {
            changed(engine.update_quantity(ItemId::new(*id), quantity))
        }
        Commands::Remove { id } => changed(engine.remove_item(ItemId::new(*id))),
    }
}

fn changed(did_change: bool) -> Outcome {
    if did_change {
        Outcome::Changed
    } else {
        Outcome::Unchanged
    }
}

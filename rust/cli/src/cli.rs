//! Command-line argument definitions.
//!
//! The parser types live apart from [`run`](crate::run) so tests can drive
//! them directly with `try_parse_from`.

use clap::{Parser, Subcommand};

/// Top-level argument structure for the pokermachine binary.
#[derive(Parser)]
#[command(
    name = "pokermachine",
    version,
    about = "Session-based draw poker against a fixed paytable"
)]
pub struct PokerMachineCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// All subcommands the CLI accepts.
#[derive(Subcommand)]
pub enum Commands {
    /// Sit down at the machine and play hands interactively
    Play {
        /// Seed for the shoe shuffle (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Statistics file to load and checkpoint
        #[arg(long)]
        data: Option<String>,
    },
    /// Show the persistent statistics ledger
    Stats {
        /// Statistics file to read
        #[arg(long)]
        data: Option<String>,
    },
    /// Display the resolved configuration and where each value came from
    Cfg,
    /// Deal one sample hand from a fresh shoe and classify it
    Deal {
        /// Seed for the shoe shuffle (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of 52-card packs in the shoe
        #[arg(long)]
        packs: Option<u8>,
    },
    /// Print the payout table
    Paytable,
}

//! Command-line argument definitions.
//!
//! Kept separate from the dispatch logic in [`crate::run`] so the parser
//! can be exercised directly in tests.

use clap::{Parser, Subcommand};

/// Top-level argument parser for the `riverline` binary.
#[derive(Debug, Parser)]
#[command(
    name = "riverline",
    version,
    about = "No-limit hold'em tables in your terminal"
)]
pub struct RiverlineCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Every subcommand the binary understands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play hands against scripted opponents
    Play {
        /// Scripted opponents seated with you (1-5)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
        opponents: u8,

        /// Hands to play before the session ends
        #[arg(long)]
        hands: Option<u32>,

        /// Deck seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Print a recommendation before each of your turns
        #[arg(long)]
        hints: bool,
    },

    /// Simulate scripted-only hands, optionally recording JSONL histories
    Sim {
        /// Hands to simulate
        #[arg(long)]
        hands: u64,

        /// Seats at the table (2-6, default from configuration)
        #[arg(long)]
        seats: Option<usize>,

        /// Policy seated everywhere: "caller" or "scripted"
        #[arg(long)]
        policy: Option<String>,

        /// Append hand records to this JSONL file
        #[arg(long)]
        output: Option<String>,

        /// Deck seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Aggregate statistics from JSONL hand histories
    Stats {
        /// JSONL file, or a directory searched for .jsonl files
        #[arg(long)]
        input: String,
    },

    /// Deal one hand face up for inspection
    Deal {
        /// Deck seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,

        /// Seats to deal in (2-6)
        #[arg(long)]
        seats: Option<usize>,
    },

    /// Show the resolved configuration and where each value came from
    Cfg,
}

//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - add: remember a new learning item
//! - review: serve items from one category
//! - quiz: build quiz material across categories
//! - reset: bring retired items back into rotation
//! - stats: per-category recall statistics

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kili - spaced-repetition practice for English learning items
#[derive(Parser, Debug)]
#[command(name = "kili")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remember a new learning item
    Add {
        /// Category to file the item under (e.g. grammar_mistakes, new_words)
        category: String,

        /// Content values, one per category field (mistake + correction,
        /// or a single word/phrase)
        #[arg(required = true, num_args = 1..=2)]
        values: Vec<String>,

        /// Optional context note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Review items from one category
    Review {
        /// Category to review
        category: String,

        /// Maximum number of items to serve
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Build quiz material from remembered items
    Quiz {
        /// Categories to draw from (defaults to all)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Total number of items across all categories
        #[arg(short, long)]
        limit: Option<usize>,

        /// Write the grouping JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reset recall progress so retired items come back into rotation
    Reset {
        /// Category to reset (all categories when omitted)
        #[arg(long = "category")]
        category: Option<String>,
    },

    /// Show per-category recall statistics
    Stats,
}

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relata: relation schema inspection
#[derive(Parser)]
#[command(name = "relata")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer a dataset's schema and print it
    Infer {
        /// Dataset name (resolves to <dir>/<dataset>.csv or .tsv)
        #[arg(value_name = "DATASET")]
        dataset: String,

        /// Directory holding the delimited files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Delimiter character (default: by extension, then auto-detect)
        #[arg(long)]
        delimiter: Option<char>,

        /// Skip primary/foreign key detection
        #[arg(long)]
        no_keys: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a dataset's primary and foreign keys
    Keys {
        /// Dataset name (resolves to <dir>/<dataset>.csv or .tsv)
        #[arg(value_name = "DATASET")]
        dataset: String,

        /// Directory holding the delimited files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

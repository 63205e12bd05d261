//! Relata CLI - relation schema inspection.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("relata=debug")
            .init();
    }

    let result = match cli.command {
        Commands::Infer {
            dataset,
            dir,
            delimiter,
            no_keys,
            json,
        } => commands::infer::run(dataset, dir, delimiter, no_keys, json),

        Commands::Keys { dataset, dir } => commands::keys::run(dataset, dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

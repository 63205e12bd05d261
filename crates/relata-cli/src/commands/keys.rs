//! Keys command - show a dataset's primary and foreign keys.

use std::path::PathBuf;

use colored::Colorize;
use relata::DelimitedConfig;

pub fn run(dataset: String, dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let schema = super::infer_schema(&dataset, &dir, DelimitedConfig::default())?;

    println!("{}", "Primary key:".yellow().bold());
    let key = schema.primary_key();
    if key.is_empty() {
        println!("  (none)");
    } else {
        for attribute in key {
            println!("  {}", attribute.name().green());
        }
    }
    println!();

    println!("{}", "Foreign keys:".yellow().bold());
    let foreign: Vec<_> = schema
        .iter()
        .filter(|attribute| attribute.is_foreign_key())
        .collect();
    if foreign.is_empty() {
        println!("  (none)");
    } else {
        for attribute in foreign {
            println!(
                "  {} {} {}",
                attribute.name().white(),
                "->".dimmed(),
                attribute.relation().unwrap_or("?").cyan()
            );
        }
    }

    Ok(())
}

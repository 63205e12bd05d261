//! Infer command - infer and print a dataset's schema.

use std::path::PathBuf;

use colored::Colorize;
use relata::DelimitedConfig;

pub fn run(
    dataset: String,
    dir: PathBuf,
    delimiter: Option<char>,
    no_keys: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let delimiter = delimiter
        .map(|c| u8::try_from(c).map_err(|_| "delimiter must be an ASCII character"))
        .transpose()?;

    let config = DelimitedConfig {
        delimiter,
        detect_keys: !no_keys,
        ..DelimitedConfig::default()
    };
    let schema = super::infer_schema(&dataset, &dir, config)?;

    if json_output {
        let payload = serde_json::json!({
            "dataset": schema.dataset(),
            "attributes": schema.iter().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{} {}",
            "Schema for".cyan().bold(),
            schema.dataset().unwrap_or(&dataset).white()
        );
        println!();

        for attribute in schema.iter() {
            let ty = format!("{:?}", attribute.ty()).to_lowercase();
            let mut tags: Vec<String> = Vec::new();
            if attribute.is_primary_key() {
                tags.push("primary key".green().to_string());
            }
            if let Some(relation) = attribute.relation() {
                tags.push(format!("-> {}", relation).yellow().to_string());
            }
            if attribute.meta().extra.get("nullable") == Some(&serde_json::Value::Bool(true)) {
                tags.push("nullable".dimmed().to_string());
            }

            println!(
                "  {} {} {}",
                format!("{:<20}", attribute.name()).white().bold(),
                format!("{:<10}", ty).cyan(),
                tags.join(", ")
            );
        }
    }

    Ok(())
}

//! CLI command implementations.

use std::path::Path;
use std::sync::Arc;

use relata::{DelimitedConfig, DelimitedInference, DirectoryGateway, Schema};

pub mod infer;
pub mod keys;

/// Build an inference-pending schema for `dataset` and populate it from a
/// directory gateway.
fn infer_schema(dataset: &str, dir: &Path, config: DelimitedConfig) -> relata::Result<Schema> {
    let capability = Arc::new(DelimitedInference::with_config(config));
    let mut schema = Schema::inferred(dataset, capability)?;
    schema.infer(&DirectoryGateway::new(dir))?;
    Ok(schema)
}

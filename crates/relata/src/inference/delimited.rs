//! Reference inference over delimited files resolved through a directory
//! gateway.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::schema::{Attribute, AttributeMap, SchemaBuilder};

use super::detect::{foreign_key_stem, is_identifier_name, pluralize, profile_column};
use super::traits::{Gateway, Inference, Inferrer};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Resolves dataset names to delimited files under one directory.
///
/// The dataset `users` resolves to `users.csv` or `users.tsv` in the root,
/// falling back to the bare name.
#[derive(Debug, Clone)]
pub struct DirectoryGateway {
    root: PathBuf,
}

impl DirectoryGateway {
    /// Create a gateway rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The gateway's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, dataset: &str) -> Result<PathBuf> {
        for extension in ["csv", "tsv"] {
            let candidate = self.root.join(format!("{dataset}.{extension}"));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        let bare = self.root.join(dataset);
        if bare.is_file() {
            return Ok(bare);
        }
        Err(SchemaError::Io {
            path: self.root.join(dataset),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no delimited file for dataset",
            ),
        })
    }
}

/// Configuration for delimited-file inference.
#[derive(Debug, Clone)]
pub struct DelimitedConfig {
    /// Delimiter to use (None = by extension, then auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum data rows to sample per dataset.
    pub sample_rows: usize,
    /// Whether to tag primary/foreign keys by naming convention.
    pub detect_keys: bool,
}

impl Default for DelimitedConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            sample_rows: 1024,
            detect_keys: true,
        }
    }
}

/// Inference capability over delimited files.
///
/// Attribute types come from sampled values; a column named `id`, `uuid`,
/// or `guid` whose sample is unique and non-null is tagged as the primary
/// key, and a `<stem>_id` column is tagged as a foreign key into the
/// pluralized stem. Attributes declared on the bound builder override
/// inferred entries of the same name.
#[derive(Debug, Clone, Default)]
pub struct DelimitedInference {
    config: DelimitedConfig,
}

impl DelimitedInference {
    /// Create the capability with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the capability with custom configuration.
    pub fn with_config(config: DelimitedConfig) -> Self {
        Self { config }
    }
}

impl Inference for DelimitedInference {
    fn bind(&self, builder: &SchemaBuilder) -> Arc<dyn Inferrer> {
        Arc::new(DelimitedInferrer {
            config: self.config.clone(),
            declared: builder.declared().cloned().unwrap_or_default(),
        })
    }
}

/// A [`DelimitedInference`] bound to one builder's declarations.
#[derive(Debug)]
pub struct DelimitedInferrer {
    config: DelimitedConfig,
    declared: AttributeMap,
}

impl Inferrer for DelimitedInferrer {
    fn call(&self, dataset: Option<&str>, gateway: &dyn Gateway) -> Result<AttributeMap> {
        let gateway = gateway
            .as_any()
            .downcast_ref::<DirectoryGateway>()
            .ok_or_else(|| {
                SchemaError::Inference(
                    "delimited inference requires a DirectoryGateway".to_string(),
                )
            })?;
        let dataset = dataset.ok_or_else(|| {
            SchemaError::Inference("cannot infer a schema without a dataset name".to_string())
        })?;

        let path = gateway.resolve(dataset)?;
        let sample = read_sample(&path, &self.config)?;
        debug!(
            dataset,
            path = %path.display(),
            columns = sample.headers.len(),
            rows = sample.rows.len(),
            "sampled dataset for inference"
        );

        let mut attributes = AttributeMap::new();
        for (index, name) in sample.headers.iter().enumerate() {
            if let Some(declared) = self.declared.get(name) {
                attributes.insert(name.clone(), declared.clone());
                continue;
            }

            let values = sample.rows.iter().map(|row| row[index].as_str());
            let profile = profile_column(values);

            let mut attribute = Attribute::new(name.clone(), profile.ty);
            if profile.nullable {
                attribute = attribute.with_tag("nullable", true);
            }
            if self.config.detect_keys {
                if is_identifier_name(name) && profile.unique && !profile.nullable {
                    attribute = attribute.with_primary_key();
                } else if let Some(stem) = foreign_key_stem(name) {
                    attribute = attribute.with_foreign_key(pluralize(&stem));
                }
            }
            attributes.insert(name.clone(), attribute);
        }

        // Declared attributes without a matching column are kept; they were
        // asked for explicitly.
        for (name, declared) in &self.declared {
            if !attributes.contains_key(name) {
                attributes.insert(name.clone(), declared.clone());
            }
        }

        Ok(attributes)
    }
}

/// A bounded sample of a delimited file.
struct Sample {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn read_sample(path: &Path, config: &DelimitedConfig) -> Result<Sample> {
    let bytes = std::fs::read(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let delimiter = match config.delimiter.or_else(|| delimiter_for_extension(path)) {
        Some(delimiter) => delimiter,
        None => detect_delimiter(&bytes)?,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(SchemaError::EmptyData("no columns found".to_string()));
    }

    let expected_columns = headers.len();
    let mut rows = Vec::new();
    for result in reader.records().take(config.sample_rows) {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(expected_columns, String::new());
        rows.push(row);
    }

    Ok(Sample { headers, rows })
}

fn delimiter_for_extension(path: &Path) -> Option<u8> {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("tsv") => Some(b'\t'),
        Some("csv") => Some(b','),
        _ => None,
    }
}

/// Detect the delimiter by scoring consistency over the first lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = bytes
        .lines()
        .take(10)
        .map_while(|line| line.ok())
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SchemaError::EmptyData("no lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0usize;

    for &delimiter in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delimiter))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&count| count == first_count);
        let score = if consistent {
            first_count * 1000 + usize::from(delimiter == b'\t') * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delimiter = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

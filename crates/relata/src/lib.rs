//! Relata: typed relation schema descriptors.
//!
//! A [`Schema`] describes a data source's attributes: name, value type, and
//! per-attribute metadata such as primary/foreign key tags. Schemas are
//! declared by hand through a builder DSL or inferred from a live gateway,
//! and freeze the moment their attributes are populated.
//!
//! # Core principles
//!
//! - **Declarative**: a schema reads as a flat list of attribute
//!   declarations scoped to one dataset
//! - **Immutable once defined**: after finalize or inference, every query
//!   is a pure function of the schema's state
//! - **Inference-agnostic**: the gateway is opaque; strategies plug in
//!   behind the [`Inference`] and [`Inferrer`] traits
//!
//! # Example
//!
//! ```
//! use relata::{AttrType, Schema};
//!
//! # fn main() -> relata::Result<()> {
//! let users = Schema::define("users", |s| {
//!     s.attribute("id", AttrType::Integer);
//!     s.attribute("email", AttrType::String);
//!     s.primary_key(["id"])?;
//!     Ok(())
//! })?;
//!
//! assert!(users.is_defined());
//! assert_eq!(users.get("email")?.ty(), AttrType::String);
//! assert_eq!(users.primary_key()[0].name(), "id");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod inference;
pub mod schema;

pub use error::{Result, SchemaError};
pub use inference::{
    DelimitedConfig, DelimitedInference, DirectoryGateway, FixedInference, Gateway, Inference,
    Inferrer,
};
pub use schema::{AttrType, Attribute, AttributeMap, AttributeMeta, Schema, SchemaBuilder};

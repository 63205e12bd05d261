//! Schema model: attributes, types, the builder DSL, and the descriptor.

mod attribute;
mod builder;
mod descriptor;
mod types;

pub use attribute::{Attribute, AttributeMeta};
pub use builder::SchemaBuilder;
pub use descriptor::{AttributeMap, Schema};
pub use types::AttrType;

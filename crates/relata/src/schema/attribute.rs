//! Attribute definitions and their metadata tags.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::AttrType;

/// Metadata tags attached to an attribute.
///
/// The well-known tags that schema queries depend on are plain fields;
/// adapter-specific tags go through `extra` and are preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeMeta {
    /// Part of the relation's primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// References another relation's key.
    #[serde(default)]
    pub foreign_key: bool,
    /// Name of the referenced relation, when `foreign_key` is set.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub relation: Option<String>,
    /// Adapter-specific tags, order-stable.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, Value>,
}

/// A single typed attribute of a relation schema.
///
/// The name is fixed at construction and never changes. Attributes may be
/// shared across schemas, so tagging operations return a new value instead
/// of mutating the receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    #[serde(rename = "type")]
    ty: AttrType,
    #[serde(default)]
    meta: AttributeMeta,
}

impl Attribute {
    /// Create an attribute with the given name and type and no tags.
    pub fn new(name: impl Into<String>, ty: AttrType) -> Self {
        Self {
            name: name.into(),
            ty,
            meta: AttributeMeta::default(),
        }
    }

    /// The attribute's name, unique within its schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute's value type.
    pub fn ty(&self) -> AttrType {
        self.ty
    }

    /// The attribute's metadata tags.
    pub fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    /// Whether this attribute is part of the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.meta.primary_key
    }

    /// Whether this attribute references another relation.
    pub fn is_foreign_key(&self) -> bool {
        self.meta.foreign_key
    }

    /// The referenced relation, for foreign-key attributes.
    pub fn relation(&self) -> Option<&str> {
        self.meta.relation.as_deref()
    }

    /// A copy of this attribute tagged as part of the primary key.
    pub fn with_primary_key(&self) -> Self {
        let mut tagged = self.clone();
        tagged.meta.primary_key = true;
        tagged
    }

    /// A copy of this attribute tagged as a foreign key into `relation`.
    pub fn with_foreign_key(&self, relation: impl Into<String>) -> Self {
        let mut tagged = self.clone();
        tagged.meta.foreign_key = true;
        tagged.meta.relation = Some(relation.into());
        tagged
    }

    /// A copy of this attribute carrying an adapter-specific tag.
    pub fn with_tag(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut tagged = self.clone();
        tagged.meta.extra.insert(key.into(), value.into());
        tagged
    }
}

//! The relation schema descriptor and its read API.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::inference::{Gateway, Inference, Inferrer};

use super::attribute::Attribute;
use super::builder::SchemaBuilder;

/// Mapping from attribute name to definition, in declaration order.
pub type AttributeMap = IndexMap<String, Attribute>;

/// A typed description of a data source's attributes.
///
/// A schema is either *defined* (attributes present, frozen) or
/// *inference-pending* (attributes absent, an [`Inferrer`] held until a
/// gateway becomes available). It freezes the moment attributes become
/// present, whether that happens at [`finalize`] or at [`infer`]; from then
/// on every query is a pure function of its state, and the value is safe to
/// share across threads for unsynchronized reads.
///
/// [`finalize`]: SchemaBuilder::finalize
/// [`infer`]: Schema::infer
#[derive(Debug, Clone)]
pub struct Schema {
    dataset: Option<String>,
    attributes: Option<AttributeMap>,
    inferrer: Option<Arc<dyn Inferrer>>,
}

impl Schema {
    /// Declare a schema for `dataset` with a declaration closure.
    ///
    /// ```
    /// use relata::{AttrType, Schema};
    ///
    /// # fn main() -> relata::Result<()> {
    /// let users = Schema::define("users", |s| {
    ///     s.attribute("id", AttrType::Integer);
    ///     s.attribute("name", AttrType::String);
    ///     s.primary_key(["id"])?;
    ///     Ok(())
    /// })?;
    ///
    /// assert_eq!(users.primary_key().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn define<F>(dataset: impl Into<String>, block: F) -> Result<Self>
    where
        F: FnOnce(&mut SchemaBuilder) -> Result<()>,
    {
        SchemaBuilder::new(dataset).declare(block)?.finalize()
    }

    /// Declare an inference-pending schema for `dataset`.
    ///
    /// The returned schema holds no attributes until [`Schema::infer`] runs
    /// against a gateway.
    pub fn inferred(dataset: impl Into<String>, capability: Arc<dyn Inference>) -> Result<Self> {
        SchemaBuilder::new(dataset)
            .with_inference(capability)
            .finalize()
    }

    pub(crate) fn from_parts(
        dataset: Option<String>,
        attributes: Option<AttributeMap>,
        inferrer: Option<Arc<dyn Inferrer>>,
    ) -> Self {
        Self {
            dataset,
            attributes,
            inferrer,
        }
    }

    /// Name of the underlying data source.
    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    /// Whether attributes have been populated, at construction or via
    /// [`Schema::infer`].
    pub fn is_defined(&self) -> bool {
        self.attributes.is_some()
    }

    /// The full attribute mapping, in declaration order. `None` while
    /// inference is pending.
    pub fn attributes(&self) -> Option<&AttributeMap> {
        self.attributes.as_ref()
    }

    /// Iterate over attributes in declaration order.
    ///
    /// Re-iterating yields the same sequence; a pending schema yields
    /// nothing.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().flat_map(|attributes| attributes.values())
    }

    /// Number of attributes; zero while inference is pending.
    pub fn len(&self) -> usize {
        self.attributes.as_ref().map_or(0, |attributes| attributes.len())
    }

    /// Whether the schema holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All attribute names, in declaration order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.iter().map(Attribute::name).collect()
    }

    /// Look up an attribute by name.
    ///
    /// Fails with [`SchemaError::UnknownAttribute`] when the name is absent;
    /// on a pending schema every name is absent.
    pub fn get(&self, name: &str) -> Result<&Attribute> {
        self.attributes
            .as_ref()
            .and_then(|attributes| attributes.get(name))
            .ok_or_else(|| SchemaError::UnknownAttribute {
                name: name.to_string(),
            })
    }

    /// The attributes tagged as primary key, in declaration order.
    ///
    /// An empty result is valid; not every relation declares a key.
    pub fn primary_key(&self) -> Vec<&Attribute> {
        self.iter()
            .filter(|attribute| attribute.is_primary_key())
            .collect()
    }

    /// The first attribute, in declaration order, marked as a foreign key
    /// into `relation`.
    ///
    /// Uniqueness of foreign keys per referenced relation is not enforced;
    /// if duplicates exist the first match wins.
    pub fn foreign_key(&self, relation: &str) -> Option<&Attribute> {
        self.iter().find(|attribute| {
            attribute.is_foreign_key() && attribute.relation() == Some(relation)
        })
    }

    /// Populate attributes from the held inferrer and freeze the schema.
    ///
    /// Valid only while [`is_defined`] is false; calling it on a defined
    /// schema fails with [`SchemaError::AlreadyDefined`] and changes
    /// nothing. Inferrer failures propagate unchanged and leave the schema
    /// pending; there is no partially populated state.
    ///
    /// [`is_defined`]: Schema::is_defined
    pub fn infer(&mut self, gateway: &dyn Gateway) -> Result<()> {
        if self.is_defined() {
            return Err(SchemaError::AlreadyDefined);
        }
        let inferrer = self.inferrer.as_ref().ok_or_else(|| {
            SchemaError::Configuration("schema holds no inferrer to populate attributes".to_string())
        })?;

        let attributes = inferrer.call(self.dataset.as_deref(), gateway)?;
        debug!(
            dataset = self.dataset.as_deref().unwrap_or("<anonymous>"),
            attributes = attributes.len(),
            "schema attributes inferred"
        );
        self.attributes = Some(attributes);
        Ok(())
    }
}

/// Schemas are equal when dataset, attribute mapping (including metadata),
/// and inferrer reference all agree. The inferrer comparison is reference
/// identity, which lets consumers key caches on schema value.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.dataset == other.dataset
            && self.attributes == other.attributes
            && match (&self.inferrer, &other.inferrer) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

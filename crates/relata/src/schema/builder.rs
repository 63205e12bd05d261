//! Declarative builder for relation schemas.

use std::sync::Arc;

use crate::error::{Result, SchemaError};
use crate::inference::Inference;

use super::attribute::Attribute;
use super::descriptor::{AttributeMap, Schema};
use super::types::AttrType;

/// Accumulates attribute declarations for one dataset, then produces a
/// [`Schema`].
///
/// Declarations happen through a closure passed to [`declare`], which
/// receives the builder explicitly. The closure sees nothing but the
/// builder's own operations, so the declaration reads as a flat list:
///
/// ```
/// use relata::{AttrType, SchemaBuilder};
///
/// # fn main() -> relata::Result<()> {
/// let schema = SchemaBuilder::new("users")
///     .declare(|s| {
///         s.attribute("id", AttrType::Integer);
///         s.attribute("email", AttrType::String);
///         s.primary_key(["id"])?;
///         Ok(())
///     })?
///     .finalize()?;
///
/// assert!(schema.is_defined());
/// # Ok(())
/// # }
/// ```
///
/// A builder that ends up with neither declared attributes nor an inference
/// capability cannot ever produce attributes; [`finalize`] rejects it.
///
/// [`declare`]: SchemaBuilder::declare
/// [`finalize`]: SchemaBuilder::finalize
#[derive(Debug)]
pub struct SchemaBuilder {
    dataset: Option<String>,
    attributes: Option<AttributeMap>,
    inference: Option<Arc<dyn Inference>>,
}

impl SchemaBuilder {
    /// Start a builder for the named dataset.
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: Some(dataset.into()),
            attributes: None,
            inference: None,
        }
    }

    /// Start a builder with no dataset name yet.
    pub fn anonymous() -> Self {
        Self {
            dataset: None,
            attributes: None,
            inference: None,
        }
    }

    /// Attach an inference capability for populating attributes lazily.
    pub fn with_inference(mut self, capability: Arc<dyn Inference>) -> Self {
        self.inference = Some(capability);
        self
    }

    /// Evaluate a declaration closure against this builder, immediately and
    /// synchronously.
    pub fn declare<F>(mut self, block: F) -> Result<Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        block(&mut self)?;
        Ok(self)
    }

    /// Register an attribute under `name`. Re-declaring a name overwrites
    /// the previous entry.
    pub fn attribute(&mut self, name: impl Into<String>, ty: AttrType) -> &mut Self {
        let name = name.into();
        let attribute = Attribute::new(name.clone(), ty);
        self.attributes
            .get_or_insert_with(AttributeMap::new)
            .insert(name, attribute);
        self
    }

    /// Tag the named, previously declared attributes as the primary key.
    ///
    /// Every name is validated before any attribute is tagged, so a failed
    /// call leaves the builder unchanged.
    pub fn primary_key<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        for name in &names {
            let declared = self
                .attributes
                .as_ref()
                .is_some_and(|attributes| attributes.contains_key(name));
            if !declared {
                return Err(SchemaError::UnknownAttribute { name: name.clone() });
            }
        }

        if let Some(attributes) = self.attributes.as_mut() {
            for name in &names {
                if let Some(attribute) = attributes.get(name) {
                    let tagged = attribute.with_primary_key();
                    attributes.insert(name.clone(), tagged);
                }
            }
        }

        Ok(self)
    }

    /// Produce a schema from the accumulated state.
    ///
    /// The inference capability, when present, is bound to this builder so
    /// strategies can see the dataset and any hand-declared attributes.
    /// The builder itself is not consumed; repeated calls yield independent
    /// schemas with no shared attribute storage.
    pub fn finalize(&self) -> Result<Schema> {
        if self.attributes.is_none() && self.inference.is_none() {
            return Err(SchemaError::Configuration(
                "a declaration block or an inferrer is required to define a schema".to_string(),
            ));
        }

        let inferrer = self
            .inference
            .as_ref()
            .map(|capability| capability.bind(self));

        Ok(Schema::from_parts(
            self.dataset.clone(),
            self.attributes.clone(),
            inferrer,
        ))
    }

    /// The dataset this builder describes, if named yet.
    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    /// Attributes declared so far, in declaration order.
    pub fn declared(&self) -> Option<&AttributeMap> {
        self.attributes.as_ref()
    }
}

//! Inference from a predetermined attribute set.

use std::sync::Arc;

use crate::error::Result;
use crate::schema::{Attribute, AttributeMap, SchemaBuilder};

use super::traits::{Gateway, Inference, Inferrer};

/// Inference capability that returns a predetermined attribute map.
///
/// Useful in tests and for adapters whose schemas are known statically and
/// need no live gateway. Attributes declared on the bound builder override
/// entries of the same name.
#[derive(Debug, Clone, Default)]
pub struct FixedInference {
    attributes: AttributeMap,
}

impl FixedInference {
    /// Create the capability from an attribute map.
    pub fn new(attributes: AttributeMap) -> Self {
        Self { attributes }
    }

    /// Create the capability from a sequence of attributes.
    pub fn of(attributes: impl IntoIterator<Item = Attribute>) -> Self {
        Self {
            attributes: attributes
                .into_iter()
                .map(|attribute| (attribute.name().to_string(), attribute))
                .collect(),
        }
    }
}

impl Inference for FixedInference {
    fn bind(&self, builder: &SchemaBuilder) -> Arc<dyn Inferrer> {
        let mut attributes = self.attributes.clone();
        if let Some(declared) = builder.declared() {
            for (name, attribute) in declared {
                attributes.insert(name.clone(), attribute.clone());
            }
        }
        Arc::new(FixedInferrer { attributes })
    }
}

/// A [`FixedInference`] bound to one builder's declarations.
#[derive(Debug)]
pub struct FixedInferrer {
    attributes: AttributeMap,
}

impl Inferrer for FixedInferrer {
    fn call(&self, _dataset: Option<&str>, _gateway: &dyn Gateway) -> Result<AttributeMap> {
        Ok(self.attributes.clone())
    }
}

//! Interfaces between schemas and the strategies that populate them.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::schema::{AttributeMap, SchemaBuilder};

/// Opaque handle to a live data source.
///
/// The schema core never inspects a gateway; it is passed through to the
/// inferrer unexamined. Any `'static` value qualifies; a concrete inferrer
/// downcasts to the gateway type it understands.
pub trait Gateway: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> Gateway for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A capability that can populate a schema's attributes from a gateway.
///
/// Bound to a builder at finalize time, so strategies get to see the
/// dataset name and any hand-declared attributes before inference runs.
pub trait Inference: fmt::Debug + Send + Sync {
    /// Construct an inferrer bound to the builder's context.
    fn bind(&self, builder: &SchemaBuilder) -> Arc<dyn Inferrer>;
}

/// A bound inferrer, held by an inference-pending [`Schema`].
///
/// [`Schema`]: crate::Schema
pub trait Inferrer: fmt::Debug + Send + Sync {
    /// Produce the attribute mapping for `dataset` by consulting `gateway`.
    ///
    /// Failures propagate unchanged to the caller of [`Schema::infer`];
    /// no partial mapping is ever stored.
    ///
    /// [`Schema::infer`]: crate::Schema::infer
    fn call(&self, dataset: Option<&str>, gateway: &dyn Gateway) -> Result<AttributeMap>;
}

//! Core type definitions for attribute values.

use serde::{Deserialize, Serialize};

/// Value type of a schema attribute.
///
/// Coercion and validation of actual values is left to the layers that
/// consume a schema; the descriptor only records which kind of value an
/// attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text/string values.
    String,
    /// Boolean values (true/false).
    Boolean,
    /// Date and time values.
    DateTime,
    /// Date only (no time component).
    Date,
    /// Time only (no date component).
    Time,
    /// Unable to determine type.
    Unknown,
}

impl AttrType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, AttrType::Integer | AttrType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, AttrType::DateTime | AttrType::Date | AttrType::Time)
    }
}

impl Default for AttrType {
    fn default() -> Self {
        AttrType::Unknown
    }
}

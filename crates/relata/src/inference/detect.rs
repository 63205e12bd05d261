//! Value and column type detection for delimited data.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::AttrType;

/// Column names that look like a relation's own key.
static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(id|uuid|guid)$").unwrap());

/// Column names that look like a reference into another relation.
static FOREIGN_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([a-z0-9]+(?:_[a-z0-9]+)*)_id$").unwrap());

/// Boolean-looking tokens.
static BOOLEAN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(true|false|yes|no|y|n|t|f)$").unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Check if a value represents a missing/null value.
pub fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// Detect the type of a single non-null value.
pub fn detect_value_type(value: &str) -> AttrType {
    let trimmed = value.trim();

    if trimmed.parse::<i64>().is_ok() {
        return AttrType::Integer;
    }
    if trimmed.parse::<f64>().is_ok() {
        return AttrType::Float;
    }
    if BOOLEAN_PATTERN.is_match(trimmed) {
        return AttrType::Boolean;
    }
    if is_datetime(trimmed) {
        return AttrType::DateTime;
    }
    if is_date(trimmed) {
        return AttrType::Date;
    }
    if is_time(trimmed) {
        return AttrType::Time;
    }
    AttrType::String
}

fn is_date(value: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
}

fn is_datetime(value: &str) -> bool {
    DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
        || DateTime::parse_from_rfc3339(value).is_ok()
}

fn is_time(value: &str) -> bool {
    TIME_FORMATS
        .iter()
        .any(|format| NaiveTime::parse_from_str(value, format).is_ok())
}

/// Merge two observed value types into the narrowest common one.
fn merge_types(a: AttrType, b: AttrType) -> AttrType {
    use AttrType::*;
    if a == b {
        return a;
    }
    match (a, b) {
        (Integer, Float) | (Float, Integer) => Float,
        (Date, DateTime) | (DateTime, Date) => DateTime,
        _ => String,
    }
}

/// Aggregate shape of a sampled column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnProfile {
    /// Narrowest type covering every non-null sampled value.
    pub ty: AttrType,
    /// Whether any null-like value was seen.
    pub nullable: bool,
    /// Whether all non-null sampled values were distinct. False for a
    /// column with no non-null values at all.
    pub unique: bool,
}

/// Profile a column from its sampled values.
pub fn profile_column<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnProfile {
    let mut merged: Option<AttrType> = None;
    let mut nullable = false;
    let mut unique = true;
    let mut non_null = 0usize;
    let mut seen: HashSet<&str> = HashSet::new();

    for value in values {
        if is_null_token(value) {
            nullable = true;
            continue;
        }
        non_null += 1;
        if !seen.insert(value) {
            unique = false;
        }
        let ty = detect_value_type(value);
        merged = Some(match merged {
            None => ty,
            Some(previous) => merge_types(previous, ty),
        });
    }

    ColumnProfile {
        ty: merged.unwrap_or(AttrType::Unknown),
        nullable,
        unique: unique && non_null > 0,
    }
}

/// Whether a column name marks the relation's own identifier.
pub fn is_identifier_name(name: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(name)
}

/// The referenced-relation stem of a `<stem>_id` column name, lowercased.
pub fn foreign_key_stem(name: &str) -> Option<String> {
    FOREIGN_KEY_PATTERN
        .captures(name)
        .map(|captures| captures[1].to_lowercase())
}

/// Naive pluralization for naming-convention foreign keys.
pub fn pluralize(stem: &str) -> String {
    if stem.ends_with('s') {
        return stem.to_string();
    }
    if let Some(prefix) = stem.strip_suffix('y') {
        let vowel_before = prefix
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !vowel_before {
            return format!("{prefix}ies");
        }
    }
    format!("{stem}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_value_types() {
        assert_eq!(detect_value_type("42"), AttrType::Integer);
        assert_eq!(detect_value_type("-17"), AttrType::Integer);
        assert_eq!(detect_value_type("3.14"), AttrType::Float);
        assert_eq!(detect_value_type("1e5"), AttrType::Float);
        assert_eq!(detect_value_type("true"), AttrType::Boolean);
        assert_eq!(detect_value_type("No"), AttrType::Boolean);
        assert_eq!(detect_value_type("2023-04-01"), AttrType::Date);
        assert_eq!(detect_value_type("2023-04-01 12:30:00"), AttrType::DateTime);
        assert_eq!(detect_value_type("12:30:00"), AttrType::Time);
        assert_eq!(detect_value_type("hello"), AttrType::String);
    }

    #[test]
    fn test_invalid_dates_are_strings() {
        assert_eq!(detect_value_type("2023-13-45"), AttrType::String);
        assert_eq!(detect_value_type("99/99/9999"), AttrType::String);
    }

    #[test]
    fn test_profile_merges_numeric_types() {
        let profile = profile_column(["1", "2.5", "3"]);
        assert_eq!(profile.ty, AttrType::Float);
        assert!(!profile.nullable);
        assert!(profile.unique);
    }

    #[test]
    fn test_profile_mixed_types_fall_back_to_string() {
        let profile = profile_column(["1", "apple"]);
        assert_eq!(profile.ty, AttrType::String);
    }

    #[test]
    fn test_profile_nulls_and_duplicates() {
        let profile = profile_column(["a", "NA", "a", ""]);
        assert_eq!(profile.ty, AttrType::String);
        assert!(profile.nullable);
        assert!(!profile.unique);
    }

    #[test]
    fn test_profile_all_null_column_is_unknown() {
        let profile = profile_column(["", "NA", "null"]);
        assert_eq!(profile.ty, AttrType::Unknown);
        assert!(profile.nullable);
        assert!(!profile.unique);
    }

    #[test]
    fn test_key_name_patterns() {
        assert!(is_identifier_name("id"));
        assert!(is_identifier_name("UUID"));
        assert!(!is_identifier_name("user_id"));

        assert_eq!(foreign_key_stem("user_id").as_deref(), Some("user"));
        assert_eq!(
            foreign_key_stem("parent_category_id").as_deref(),
            Some("parent_category")
        );
        assert_eq!(foreign_key_stem("id"), None);
        assert_eq!(foreign_key_stem("identifier"), None);
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("status"), "status");
    }
}

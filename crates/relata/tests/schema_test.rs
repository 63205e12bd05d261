//! Integration tests for schema declaration and the read API.

use std::sync::Arc;

use relata::schema::AttributeMap;
use relata::{
    AttrType, Attribute, FixedInference, Gateway, Inference, Inferrer, Schema, SchemaBuilder,
    SchemaError,
};

// =============================================================================
// Declaration Tests
// =============================================================================

#[test]
fn test_declared_schema_round_trip() {
    let schema = Schema::define("users", |s| {
        s.attribute("id", AttrType::Integer);
        s.attribute("email", AttrType::String);
        s.attribute("joined_on", AttrType::Date);
        Ok(())
    })
    .expect("declaration failed");

    assert!(schema.is_defined());
    assert!(!schema.is_empty());
    assert_eq!(schema.len(), 3);
    assert_eq!(schema.dataset(), Some("users"));

    // Iterating then re-looking each attribute up yields equal values.
    for attribute in schema.iter() {
        let looked_up = schema.get(attribute.name()).expect("lookup failed");
        assert_eq!(looked_up, attribute);
    }
}

#[test]
fn test_no_primary_key_declared_means_empty_key() {
    let schema = Schema::define("logs", |s| {
        s.attribute("message", AttrType::String);
        s.attribute("at", AttrType::DateTime);
        Ok(())
    })
    .expect("declaration failed");

    assert!(schema.primary_key().is_empty());
    assert_eq!(schema.get("message").unwrap().ty(), AttrType::String);
    assert_eq!(schema.get("message").unwrap().name(), "message");
}

#[test]
fn test_composite_primary_key_in_declaration_order() {
    let schema = Schema::define("memberships", |s| {
        s.attribute("user_id", AttrType::Integer);
        s.attribute("group_id", AttrType::Integer);
        s.attribute("since", AttrType::Date);
        s.primary_key(["user_id", "group_id"])?;
        Ok(())
    })
    .expect("declaration failed");

    let key: Vec<&str> = schema
        .primary_key()
        .into_iter()
        .map(|attribute| attribute.name())
        .collect();
    assert_eq!(key, vec!["user_id", "group_id"]);
    assert_eq!(schema.get("user_id").unwrap().ty(), AttrType::Integer);
}

#[test]
fn test_primary_key_on_undeclared_name_fails_the_declaration() {
    let result = Schema::define("users", |s| {
        s.attribute("id", AttrType::Integer);
        s.primary_key(["missing"])?;
        Ok(())
    });

    assert!(matches!(
        result.unwrap_err(),
        SchemaError::UnknownAttribute { ref name } if name == "missing"
    ));
}

#[test]
fn test_builder_without_block_or_inferrer_fails() {
    let err = SchemaBuilder::new("users").finalize().unwrap_err();
    assert!(matches!(err, SchemaError::Configuration(_)));
}

// =============================================================================
// Inference Lifecycle Tests
// =============================================================================

#[test]
fn test_inference_pending_schema_defines_on_infer() {
    let capability = Arc::new(FixedInference::of([Attribute::new(
        "email",
        AttrType::String,
    )]));
    let mut schema = Schema::inferred("users", capability).expect("construction failed");

    assert!(!schema.is_defined());
    assert!(schema.iter().next().is_none());
    assert!(matches!(
        schema.get("email").unwrap_err(),
        SchemaError::UnknownAttribute { .. }
    ));

    schema.infer(&()).expect("inference failed");

    assert!(schema.is_defined());
    assert_eq!(schema.get("email").unwrap().ty(), AttrType::String);
}

#[test]
fn test_second_infer_fails_loudly() {
    let capability = Arc::new(FixedInference::of([Attribute::new(
        "email",
        AttrType::String,
    )]));
    let mut schema = Schema::inferred("users", capability).expect("construction failed");

    schema.infer(&()).expect("inference failed");
    let after_first: Option<AttributeMap> = schema.attributes().cloned();

    let err = schema.infer(&()).unwrap_err();
    assert!(matches!(err, SchemaError::AlreadyDefined));
    assert_eq!(schema.attributes().cloned(), after_first);
}

#[derive(Debug)]
struct FailingInference;

impl Inference for FailingInference {
    fn bind(&self, _builder: &SchemaBuilder) -> Arc<dyn Inferrer> {
        Arc::new(FailingInferrer)
    }
}

#[derive(Debug)]
struct FailingInferrer;

impl Inferrer for FailingInferrer {
    fn call(&self, _dataset: Option<&str>, _gateway: &dyn Gateway) -> relata::Result<AttributeMap> {
        Err(SchemaError::Inference("gateway unavailable".to_string()))
    }
}

#[test]
fn test_failed_inference_leaves_schema_pending() {
    let mut schema =
        Schema::inferred("users", Arc::new(FailingInference)).expect("construction failed");

    let err = schema.infer(&()).unwrap_err();
    assert!(matches!(err, SchemaError::Inference(_)));

    // No partial population: the schema can still be inferred later.
    assert!(!schema.is_defined());
}

// =============================================================================
// Key Query Tests
// =============================================================================

#[test]
fn test_foreign_key_lookup() {
    let capability = Arc::new(FixedInference::of([
        Attribute::new("id", AttrType::Integer).with_primary_key(),
        Attribute::new("user_id", AttrType::Integer).with_foreign_key("users"),
        Attribute::new("note", AttrType::String),
    ]));
    let mut schema = Schema::inferred("tasks", capability).expect("construction failed");
    schema.infer(&()).expect("inference failed");

    let fk = schema.foreign_key("users").expect("foreign key not found");
    assert_eq!(fk.name(), "user_id");
    assert_eq!(fk.relation(), Some("users"));

    assert!(schema.foreign_key("projects").is_none());
}

// =============================================================================
// Equality Tests
// =============================================================================

#[test]
fn test_identical_declarations_are_equal() {
    let declare = || {
        Schema::define("users", |s| {
            s.attribute("id", AttrType::Integer);
            s.attribute("email", AttrType::String);
            s.primary_key(["id"])?;
            Ok(())
        })
        .expect("declaration failed")
    };

    assert_eq!(declare(), declare());
}

#[test]
fn test_changed_type_breaks_equality() {
    let a = Schema::define("users", |s| {
        s.attribute("id", AttrType::Integer);
        Ok(())
    })
    .unwrap();
    let b = Schema::define("users", |s| {
        s.attribute("id", AttrType::String);
        Ok(())
    })
    .unwrap();

    assert_ne!(a, b);
}

#[test]
fn test_changed_metadata_breaks_equality() {
    let a = Schema::define("users", |s| {
        s.attribute("id", AttrType::Integer);
        Ok(())
    })
    .unwrap();
    let b = Schema::define("users", |s| {
        s.attribute("id", AttrType::Integer);
        s.primary_key(["id"])?;
        Ok(())
    })
    .unwrap();

    assert_ne!(a, b);
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_attribute_json_round_trip() {
    let attribute = Attribute::new("user_id", AttrType::Integer)
        .with_foreign_key("users")
        .with_tag("nullable", true);

    let json = serde_json::to_string(&attribute).expect("serialize failed");
    let decoded: Attribute = serde_json::from_str(&json).expect("deserialize failed");

    assert_eq!(decoded, attribute);
    assert!(json.contains("\"type\":\"integer\""));
}

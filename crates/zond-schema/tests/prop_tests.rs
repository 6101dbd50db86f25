//! Property-based tests for the schema validation engine
//!
//! These tests verify that the validators behave correctly across a wide
//! range of inputs: no panics on arbitrary JSON, strict-match acceptance,
//! nullable short-circuiting, and coercion round-trip idempotence.

use proptest::prelude::*;
use serde_json::{json, Value};
use zond_schema::{
    ArraySchema, BooleanSchema, FloatSchema, IntegerSchema, ObjectSchema, OneOfSchema, Schema,
    StringSchema, ValidationKind,
};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        10, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-zA-Z_][a-zA-Z0-9_]{0,20}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// An assortment of schema graphs exercising every concrete type
fn schema_zoo() -> Vec<Box<dyn Schema>> {
    vec![
        Box::new(StringSchema::new().min(1).max(100)),
        Box::new(StringSchema::new().coerce().email()),
        Box::new(IntegerSchema::new().min_exclusive(-100).max_exclusive(100)),
        Box::new(IntegerSchema::new().coerce().enum_values([0, 1, 2])),
        Box::new(FloatSchema::new().coerce()),
        Box::new(BooleanSchema::new().coerce()),
        Box::new(
            ObjectSchema::new()
                .field("a", IntegerSchema::new().coerce())
                .field("b", StringSchema::new().optional())
                .no_additional_properties(),
        ),
        Box::new(ArraySchema::new(IntegerSchema::new().coerce()).max(10)),
        Box::new(
            OneOfSchema::new()
                .variant(IntegerSchema::new())
                .variant(StringSchema::new())
                .nullable(),
        ),
    ]
}

proptest! {
    /// Property: validators never panic on any JSON input
    #[test]
    fn prop_validators_never_panic(input in json_value_strategy()) {
        for schema in schema_zoo() {
            let _ = schema.valid(&input);
            let _ = schema.error(&input);
        }
    }

    /// Property: a value already matching the target shape is valid with
    /// coercion disabled
    #[test]
    fn prop_strict_match_succeeds(n in any::<i64>(), text in "[a-zA-Z0-9 ]{0,50}", flag in any::<bool>()) {
        prop_assert!(IntegerSchema::new().valid(&json!(n)));
        prop_assert!(StringSchema::new().valid(&json!(text)));
        prop_assert!(BooleanSchema::new().valid(&json!(flag)));
        prop_assert!(ArraySchema::new(IntegerSchema::new()).valid(&json!([n])));
        prop_assert_eq!(IntegerSchema::new().error(&json!(n)), None);
    }

    /// Property: nullable/optional/default schemas always accept an absent
    /// input, regardless of any other configured constraint
    #[test]
    fn prop_nullable_absent_always_succeeds(min in -50i64..50, max in -50i64..50, default in any::<i64>()) {
        let nullable = IntegerSchema::new().min(min).max(max).nullable();
        prop_assert!(nullable.valid(&Value::Null));

        let optional = StringSchema::new().min(10).optional();
        prop_assert!(optional.valid(&Value::Null));

        let defaulted = IntegerSchema::new()
            .min(min)
            .max(max)
            .enum_values([min])
            .default_value(default);
        let result = defaulted.validate(&Value::Null);
        prop_assert!(result.is_valid());
        prop_assert_eq!(result.unwrap(), json!(default));
    }

    /// Property: a coerced output revalidates cleanly with coercion
    /// disabled (coerced output always matches the strict target shape)
    #[test]
    fn prop_coerce_round_trip_idempotence(
        i in any::<i64>(),
        as_text in any::<bool>(),
        f in -1_000_000i64..1_000_000,
        s in any::<i64>(),
        b in proptest::option::of(any::<bool>()),
    ) {
        let lax = ObjectSchema::new()
            .field("i", IntegerSchema::new().coerce())
            .field("f", FloatSchema::new().coerce())
            .field("s", StringSchema::new().coerce())
            .field("b", BooleanSchema::new().coerce().optional());
        let strict = ObjectSchema::new()
            .field("i", IntegerSchema::new())
            .field("f", FloatSchema::new())
            .field("s", StringSchema::new())
            .field("b", BooleanSchema::new().optional());

        let mut input = json!({
            "i": if as_text { json!(i.to_string()) } else { json!(i) },
            "f": f, // integer input, coerced to float
            "s": s, // numeric input, coerced to text
        });
        if let Some(flag) = b {
            input["b"] = if as_text { json!(flag.to_string()) } else { json!(flag) };
        }

        let coerced = lax.validate(&input).into_result();
        prop_assert!(coerced.is_ok());
        if let Ok(coerced) = coerced {
            prop_assert!(strict.valid(&coerced), "coerced output failed strict revalidation: {}", coerced);
        }
    }

    /// Property: a OneOf failure carries one cause per alternative, in
    /// declared order
    #[test]
    fn prop_one_of_cause_per_alternative(input in json_value_strategy()) {
        let schema = OneOfSchema::new()
            .variant(StringSchema::new())
            .variant(IntegerSchema::new());
        match schema.error(&input) {
            None => prop_assert!(input.is_string() || input.is_i64() || input.is_u64()),
            Some(error) => {
                prop_assert_eq!(error.kind, ValidationKind::OneOf);
                prop_assert_eq!(error.cause.len(), 2);
                prop_assert!(error.cause[0].message.contains("string"));
                prop_assert!(error.cause[1].message.contains("integer"));
            }
        }
    }
}

//! Zond Schema - composable validation for JSON-shaped data
//!
//! This crate provides a small, zod-inspired schema engine for
//! loosely-typed data (`serde_json::Value` trees): build a schema graph
//! once through a fluent builder surface, then validate values against it,
//! receiving structured, path-annotated errors.
//!
//! ## Features
//!
//! - **Composable schema types**: String, Integer, Float, Boolean, Object,
//!   Array, and OneOf validators nest arbitrarily
//! - **Cross-cutting modifiers**: nullable/optional/default flags, enum
//!   membership, and min/max bounds compose in any combination
//! - **Type coercion**: opt-in, best-effort conversion of raw inputs
//!   toward a schema's target shape (`"5"` → `5`, `"yes"` → `true`)
//! - **Structured errors**: every failure carries a kind tag, a path into
//!   the nested value, and a cause chain for union failures
//!
//! ## Quick Start
//!
//! ```rust
//! use zond_schema::{IntegerSchema, ObjectSchema, Schema, StringSchema};
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new()
//!     .field("name", StringSchema::new().min(1))
//!     .field("age", IntegerSchema::new().coerce().min(0));
//!
//! // coercions are applied to the returned value
//! let validated = schema.validate(&json!({"name": "Ann", "age": "42"}));
//! assert_eq!(validated.unwrap(), json!({"name": "Ann", "age": 42}));
//!
//! // failures are path-annotated
//! let error = schema.error(&json!({"name": "Ann"})).unwrap();
//! assert_eq!(error.to_string(), "expected age to be present at age: required");
//! ```
//!
//! ## Lifecycle
//!
//! Schemas are configure-then-freeze values: builder methods mutate owned
//! state and are not meant to run concurrently with validation, but a
//! finished schema is read-only and `validate` may be called from many
//! threads.
//!
//! Copyright (c) 2025 Zond Team
//! Licensed under the Apache-2.0 license

pub mod validation;

// Re-export commonly used types for convenience
pub use validation::{
    ArraySchema, BooleanSchema, FloatSchema, IntegerSchema, ObjectSchema, OneOfSchema,
    PathSegment, Schema, StringSchema, ValidationError, ValidationKind, ValidationResult,
};

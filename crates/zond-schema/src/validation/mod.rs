//! Composable validation for JSON-shaped data
//!
//! A schema graph is a tree of configured validator instances; `validate`
//! walks the schema and the value in lock-step, coercing values toward the
//! schema's target shapes and producing structured, path-annotated errors
//! on the first failure per branch.
//!
//! Copyright (c) 2025 Zond Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod schema;

mod coerce;
mod modifiers;

// Re-export commonly used types
pub use error::{PathSegment, ValidationError, ValidationKind, ValidationResult};
pub use schema::{
    ArraySchema, BooleanSchema, FloatSchema, IntegerSchema, ObjectSchema, OneOfSchema,
    Schema, StringSchema,
};

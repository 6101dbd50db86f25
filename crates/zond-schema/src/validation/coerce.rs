//! The coercion primitive shared by every concrete schema type
//!
//! Every `validate` pipeline starts here: the nullable short-circuit, then
//! either a strict shape check or a best-effort conversion toward the
//! target shape. Every conversion is explicit and total — an unhandled
//! input shape is a structured `coerce` failure, never a panic.
//!
//! Copyright (c) 2025 Zond Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ValidationError, ValidationKind};
use crate::validation::modifiers::Modifiers;
use serde_json::{Number, Value};

/// The six target shapes a schema type can coerce toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    Array,
}

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Target::String => "string",
            Target::Integer => "integer",
            Target::Float => "float",
            Target::Boolean => "boolean",
            Target::Object => "object",
            Target::Array => "array",
        }
    }

    /// Does the value's runtime shape already match this target exactly?
    fn matches(&self, value: &Value) -> bool {
        match self {
            Target::String => value.is_string(),
            Target::Integer => value.is_i64() || value.is_u64(),
            Target::Float => value.is_f64(),
            Target::Boolean => value.is_boolean(),
            Target::Object => value.is_object(),
            Target::Array => value.is_array(),
        }
    }
}

/// Outcome of the coercion step.
#[derive(Debug)]
pub(crate) enum Coerced {
    /// Nullable schema saw an absent input: the resolved default (or the
    /// absent marker). All remaining rules are bypassed.
    Absent(Value),
    /// The input, already matching or converted to the target shape.
    Value(Value),
}

fn mismatch(value: &Value, target: Target) -> ValidationError {
    ValidationError::new(
        format!("{} is not of type {}", value, target.name()),
        ValidationKind::Coerce,
    )
}

/// Reconcile a raw input with a target shape before type-specific rules run.
pub(crate) fn coerce_value(
    value: &Value,
    target: Target,
    modifiers: &Modifiers,
) -> Result<Coerced, ValidationError> {
    if modifiers.nullable && value.is_null() {
        return Ok(Coerced::Absent(modifiers.resolve_absent()));
    }

    if !modifiers.coerce {
        if target.matches(value) {
            return Ok(Coerced::Value(value.clone()));
        }
        return Err(mismatch(value, target));
    }

    convert(value, target).map(Coerced::Value)
}

/// Best-effort conversion toward the target shape.
fn convert(value: &Value, target: Target) -> Result<Value, ValidationError> {
    match target {
        Target::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(text) => match text.to_lowercase().as_str() {
                "true" | "1" | "yes" | "y" => Ok(Value::Bool(true)),
                "false" | "0" | "no" | "n" => Ok(Value::Bool(false)),
                _ => Err(ValidationError::new(
                    format!("{} is not a boolean", value),
                    ValidationKind::Coerce,
                )),
            },
            Value::Number(number) => match number.as_f64() {
                Some(n) if n == 0.0 => Ok(Value::Bool(false)),
                Some(n) if n == 1.0 => Ok(Value::Bool(true)),
                _ => Err(mismatch(value, target)),
            },
            _ => Err(mismatch(value, target)),
        },
        Target::String => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(number) => Ok(Value::String(number.to_string())),
            Value::Bool(flag) => Ok(Value::String(flag.to_string())),
            _ => Err(mismatch(value, target)),
        },
        Target::Integer => match value {
            Value::Number(number) => {
                if number.is_i64() || number.is_u64() {
                    Ok(value.clone())
                } else {
                    // float input truncates, as a generic numeric cast would
                    match number.as_f64() {
                        Some(n) if n.is_finite() => Ok(Value::Number(Number::from(n as i64))),
                        _ => Err(mismatch(value, target)),
                    }
                }
            }
            Value::String(text) => match text.trim().parse::<i64>() {
                Ok(n) => Ok(Value::Number(Number::from(n))),
                Err(_) => Err(mismatch(value, target)),
            },
            Value::Bool(flag) => Ok(Value::Number(Number::from(i64::from(*flag)))),
            _ => Err(mismatch(value, target)),
        },
        Target::Float => {
            let float = match value {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().parse::<f64>().ok(),
                Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
                _ => None,
            };
            float
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| mismatch(value, target))
        }
        Target::Object | Target::Array => {
            let parsed = match value {
                Value::String(text) => serde_json::from_str::<Value>(text)
                    .map_err(|e| {
                        ValidationError::new(
                            format!("{} is not parsable as {}: {}", value, target.name(), e),
                            ValidationKind::Coerce,
                        )
                    })?,
                other => other.clone(),
            };
            if target.matches(&parsed) {
                Ok(parsed)
            } else {
                Err(mismatch(value, target))
            }
        }
    }
}

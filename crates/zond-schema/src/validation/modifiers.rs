//! Cross-cutting modifier state shared by the concrete schema types
//!
//! Each schema type owns its own copy of the relevant state (flags, enum
//! list, bounds) and invokes the checks explicitly from its `validate`
//! pipeline; there is no shared mutable state between types.
//!
//! Copyright (c) 2025 Zond Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ValidationError, ValidationKind};
use serde_json::Value;

/// Nullability, optionality, default, and coercion flags.
///
/// Set once through the builder surface, then read-only for the life of the
/// schema. `optional` and `default` both imply `nullable`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Modifiers {
    pub coerce: bool,
    pub optional: bool,
    pub nullable: bool,
    pub default: Option<Value>,
}

impl Modifiers {
    pub fn set_optional(&mut self) {
        self.optional = true;
        self.nullable = true;
    }

    pub fn set_default(&mut self, value: Value) {
        self.default = Some(value);
        self.nullable = true;
    }

    /// The value an absent input resolves to: the configured default, or the
    /// absent marker itself.
    pub fn resolve_absent(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }
}

/// Enumeration membership constraint. A no-op until values are configured.
#[derive(Debug, Clone, Default)]
pub(crate) struct EnumRule {
    values: Option<Vec<Value>>,
}

impl EnumRule {
    pub fn set<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Some(values) = &self.values else {
            return Ok(());
        };
        if values.contains(value) {
            return Ok(());
        }
        Err(ValidationError::new(
            format!("{} is not in {}", value, Value::Array(values.clone())),
            ValidationKind::Enum,
        ))
    }
}

/// One end of a length/magnitude bound.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bound {
    pub limit: i64,
    pub inclusive: bool,
}

/// Min/max bounds with independently toggleable inclusivity.
///
/// "Length" is the character count for strings, the element count for
/// arrays, and the numeric value itself for integers and floats.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BoundsRule {
    pub min: Option<Bound>,
    pub max: Option<Bound>,
}

impl BoundsRule {
    pub fn set_min(&mut self, limit: i64, inclusive: bool) {
        self.min = Some(Bound { limit, inclusive });
    }

    pub fn set_max(&mut self, limit: i64, inclusive: bool) {
        self.max = Some(Bound { limit, inclusive });
    }

    pub fn check(&self, length: f64) -> Result<(), ValidationError> {
        if let Some(min) = self.min {
            let limit = min.limit as f64;
            if min.inclusive && length < limit {
                return Err(ValidationError::new(
                    format!(
                        "expected {} to be greater than or equal to {}",
                        length, min.limit
                    ),
                    ValidationKind::Min,
                ));
            }
            if !min.inclusive && length <= limit {
                return Err(ValidationError::new(
                    format!("expected {} to be greater than {}", length, min.limit),
                    ValidationKind::Min,
                ));
            }
        }
        if let Some(max) = self.max {
            let limit = max.limit as f64;
            if max.inclusive && length > limit {
                return Err(ValidationError::new(
                    format!(
                        "expected {} to be less than or equal to {}",
                        length, max.limit
                    ),
                    ValidationKind::Max,
                ));
            }
            if !max.inclusive && length >= limit {
                return Err(ValidationError::new(
                    format!("expected {} to be less than {}", length, max.limit),
                    ValidationKind::Max,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_implies_nullable() {
        let mut modifiers = Modifiers::default();
        modifiers.set_optional();
        assert!(modifiers.optional);
        assert!(modifiers.nullable);
    }

    #[test]
    fn test_default_implies_nullable() {
        let mut modifiers = Modifiers::default();
        modifiers.set_default(json!(42));
        assert!(modifiers.nullable);
        assert_eq!(modifiers.resolve_absent(), json!(42));

        assert_eq!(Modifiers::default().resolve_absent(), Value::Null);
    }

    #[test]
    fn test_enum_unset_is_noop() {
        let rule = EnumRule::default();
        assert!(rule.check(&json!("anything")).is_ok());
    }

    #[test]
    fn test_enum_membership() {
        let mut rule = EnumRule::default();
        rule.set(["a", "b"]);
        assert!(rule.check(&json!("a")).is_ok());
        let error = rule.check(&json!("c")).unwrap_err();
        assert_eq!(error.kind, ValidationKind::Enum);
        assert_eq!(error.message, r#""c" is not in ["a","b"]"#);
    }

    #[test]
    fn test_exclusive_bounds_at_boundary() {
        let mut rule = BoundsRule::default();
        rule.set_min(0, false);
        rule.set_max(10, false);
        assert!(rule.check(0.0).is_err());
        assert!(rule.check(1.0).is_ok());
        assert!(rule.check(9.0).is_ok());
        assert!(rule.check(10.0).is_err());
    }

    #[test]
    fn test_inclusive_bounds_at_boundary() {
        let mut rule = BoundsRule::default();
        rule.set_min(0, true);
        rule.set_max(10, true);
        assert!(rule.check(0.0).is_ok());
        assert!(rule.check(10.0).is_ok());
        assert!(rule.check(-1.0).is_err());
        assert!(rule.check(11.0).is_err());
    }

    #[test]
    fn test_bound_error_kinds_and_messages() {
        let mut rule = BoundsRule::default();
        rule.set_min(1, true);
        let error = rule.check(0.0).unwrap_err();
        assert_eq!(error.kind, ValidationKind::Min);
        assert_eq!(error.message, "expected 0 to be greater than or equal to 1");

        let mut rule = BoundsRule::default();
        rule.set_max(3, false);
        let error = rule.check(3.0).unwrap_err();
        assert_eq!(error.kind, ValidationKind::Max);
        assert_eq!(error.message, "expected 3 to be less than 3");
    }
}

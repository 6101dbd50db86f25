//! Concrete schema types and the `Schema` trait
//!
//! A schema graph is built once through the fluent builder surface, then
//! used read-only: `validate` recurses depth-first through the schema graph
//! in lock-step with the value graph, coercing and checking at each level
//! and prefixing error paths as the recursion unwinds.
//!
//! Copyright (c) 2025 Zond Team
//! Licensed under the Apache-2.0 license

use crate::validation::coerce::{coerce_value, Coerced, Target};
use crate::validation::error::{PathSegment, ValidationError, ValidationKind, ValidationResult};
use crate::validation::modifiers::{BoundsRule, EnumRule, Modifiers};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use tracing::trace;

/// A configured validator describing the expected shape and constraints of
/// a value.
///
/// Implementations are long-lived: configure through the builder surface,
/// then treat as immutable. `validate` never mutates the schema and never
/// panics on data-shape mismatches; every mismatch is a returned failure.
pub trait Schema: fmt::Debug + Send + Sync {
    /// Validate a value, returning the coerced result or a structured error.
    fn validate(&self, value: &Value) -> ValidationResult;

    /// Is a missing object key acceptable for this schema?
    fn is_optional(&self) -> bool;

    /// The error if the value is invalid, otherwise `None`.
    fn error(&self, value: &Value) -> Option<ValidationError> {
        self.validate(value).into_error()
    }

    /// Is the value valid?
    fn valid(&self, value: &Value) -> bool {
        self.validate(value).is_valid()
    }

    /// Expect the value to be valid and return the coerced result.
    ///
    /// # Panics
    ///
    /// Panics with the structured error (or with `msg` when provided) if
    /// the value is invalid.
    fn expect(&self, value: &Value, msg: Option<&str>) -> Value {
        self.validate(value).expect(msg)
    }
}

macro_rules! impl_modifier_builders {
    ($ty:ty) => {
        impl $ty {
            /// Switch the coercion step from strict type-checking to
            /// best-effort conversion.
            pub fn coerce(mut self) -> Self {
                self.modifiers.coerce = true;
                self
            }

            /// Accept an absent value, resolving it to `Null` (or the
            /// configured default) without running any other checks.
            pub fn nullable(mut self) -> Self {
                self.modifiers.nullable = true;
                self
            }

            /// Make a missing object key acceptable. Implies `nullable`.
            pub fn optional(mut self) -> Self {
                self.modifiers.set_optional();
                self
            }

            /// Substitute `value` when the input is absent. Implies
            /// `nullable`.
            pub fn default_value<V: Into<Value>>(mut self, value: V) -> Self {
                self.modifiers.set_default(value.into());
                self
            }
        }
    };
}

macro_rules! impl_enum_builder {
    ($ty:ty) => {
        impl $ty {
            /// Restrict the value to the given set.
            pub fn enum_values<I, V>(mut self, values: I) -> Self
            where
                I: IntoIterator<Item = V>,
                V: Into<Value>,
            {
                self.enumeration.set(values);
                self
            }
        }
    };
}

macro_rules! impl_bounds_builders {
    ($ty:ty) => {
        impl $ty {
            /// Inclusive lower bound on the length (or numeric value).
            pub fn min(mut self, limit: i64) -> Self {
                self.bounds.set_min(limit, true);
                self
            }

            /// Exclusive lower bound on the length (or numeric value).
            pub fn min_exclusive(mut self, limit: i64) -> Self {
                self.bounds.set_min(limit, false);
                self
            }

            /// Inclusive upper bound on the length (or numeric value).
            pub fn max(mut self, limit: i64) -> Self {
                self.bounds.set_max(limit, true);
                self
            }

            /// Exclusive upper bound on the length (or numeric value).
            pub fn max_exclusive(mut self, limit: i64) -> Self {
                self.bounds.set_max(limit, false);
                self
            }
        }
    };
}

/// String validator: coercion, enum, character-count bounds, and an
/// optional pattern rule.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    modifiers: Modifiers,
    enumeration: EnumRule,
    bounds: BoundsRule,
    pattern: Option<(Regex, ValidationKind)>,
}

impl_modifier_builders!(StringSchema);
impl_enum_builder!(StringSchema);
impl_bounds_builders!(StringSchema);

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";
const URL_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*$";

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the value to match `pattern`, reported with kind `regex`.
    ///
    /// # Panics
    ///
    /// Panics at configuration time if `pattern` is not a valid regular
    /// expression (programmer error, like an invalid schema declaration).
    pub fn regex(self, pattern: &str) -> Self {
        self.with_pattern(pattern, ValidationKind::Regex)
    }

    /// Require the value to look like an email address, reported with kind
    /// `email`.
    pub fn email(self) -> Self {
        self.with_pattern(EMAIL_PATTERN, ValidationKind::Email)
    }

    /// Require the value to look like an http(s) URL, reported with kind
    /// `url`.
    pub fn url(self) -> Self {
        self.with_pattern(URL_PATTERN, ValidationKind::Url)
    }

    fn with_pattern(mut self, pattern: &str, kind: ValidationKind) -> Self {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(error) => panic!("invalid pattern {:?}: {}", pattern, error),
        };
        self.pattern = Some((regex, kind));
        self
    }
}

impl Schema for StringSchema {
    fn validate(&self, value: &Value) -> ValidationResult {
        let coerced = match coerce_value(value, Target::String, &self.modifiers) {
            Ok(Coerced::Absent(resolved)) => return ValidationResult::ok_nullable(resolved),
            Ok(Coerced::Value(coerced)) => coerced,
            Err(error) => return ValidationResult::err(error),
        };
        if let Err(error) = self.enumeration.check(&coerced) {
            return ValidationResult::err(error);
        }
        if let Some(text) = coerced.as_str() {
            if let Err(error) = self.bounds.check(text.chars().count() as f64) {
                return ValidationResult::err(error);
            }
            if let Some((regex, kind)) = &self.pattern {
                if !regex.is_match(text) {
                    return ValidationResult::err(ValidationError::new(
                        format!("{} does not match {}", coerced, regex.as_str()),
                        *kind,
                    ));
                }
            }
        }
        ValidationResult::ok(coerced)
    }

    fn is_optional(&self) -> bool {
        self.modifiers.optional
    }
}

/// Integer validator; bounds read as ordinary numeric range checks.
#[derive(Debug, Clone, Default)]
pub struct IntegerSchema {
    modifiers: Modifiers,
    enumeration: EnumRule,
    bounds: BoundsRule,
}

impl_modifier_builders!(IntegerSchema);
impl_enum_builder!(IntegerSchema);
impl_bounds_builders!(IntegerSchema);

impl IntegerSchema {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Schema for IntegerSchema {
    fn validate(&self, value: &Value) -> ValidationResult {
        let coerced = match coerce_value(value, Target::Integer, &self.modifiers) {
            Ok(Coerced::Absent(resolved)) => return ValidationResult::ok_nullable(resolved),
            Ok(Coerced::Value(coerced)) => coerced,
            Err(error) => return ValidationResult::err(error),
        };
        if let Err(error) = self.enumeration.check(&coerced) {
            return ValidationResult::err(error);
        }
        if let Err(error) = self.bounds.check(coerced.as_f64().unwrap_or_default()) {
            return ValidationResult::err(error);
        }
        ValidationResult::ok(coerced)
    }

    fn is_optional(&self) -> bool {
        self.modifiers.optional
    }
}

/// Float validator; bounds read as ordinary numeric range checks.
#[derive(Debug, Clone, Default)]
pub struct FloatSchema {
    modifiers: Modifiers,
    enumeration: EnumRule,
    bounds: BoundsRule,
}

impl_modifier_builders!(FloatSchema);
impl_enum_builder!(FloatSchema);
impl_bounds_builders!(FloatSchema);

impl FloatSchema {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Schema for FloatSchema {
    fn validate(&self, value: &Value) -> ValidationResult {
        let coerced = match coerce_value(value, Target::Float, &self.modifiers) {
            Ok(Coerced::Absent(resolved)) => return ValidationResult::ok_nullable(resolved),
            Ok(Coerced::Value(coerced)) => coerced,
            Err(error) => return ValidationResult::err(error),
        };
        if let Err(error) = self.enumeration.check(&coerced) {
            return ValidationResult::err(error);
        }
        if let Err(error) = self.bounds.check(coerced.as_f64().unwrap_or_default()) {
            return ValidationResult::err(error);
        }
        ValidationResult::ok(coerced)
    }

    fn is_optional(&self) -> bool {
        self.modifiers.optional
    }
}

/// Boolean validator: coercion and enum only, no length semantics.
#[derive(Debug, Clone, Default)]
pub struct BooleanSchema {
    modifiers: Modifiers,
    enumeration: EnumRule,
}

impl_modifier_builders!(BooleanSchema);
impl_enum_builder!(BooleanSchema);

impl BooleanSchema {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Schema for BooleanSchema {
    fn validate(&self, value: &Value) -> ValidationResult {
        let coerced = match coerce_value(value, Target::Boolean, &self.modifiers) {
            Ok(Coerced::Absent(resolved)) => return ValidationResult::ok_nullable(resolved),
            Ok(Coerced::Value(coerced)) => coerced,
            Err(error) => return ValidationResult::err(error),
        };
        if let Err(error) = self.enumeration.check(&coerced) {
            return ValidationResult::err(error);
        }
        ValidationResult::ok(coerced)
    }

    fn is_optional(&self) -> bool {
        self.modifiers.optional
    }
}

/// A declared object field: either a nested schema or an exact-match
/// literal.
#[derive(Debug)]
pub(crate) enum FieldRule {
    /// Validate the input value against a nested schema
    Schema(Box<dyn Schema>),
    /// Require structural equality with a literal value
    Literal(Value),
}

/// Object validator: ordered field declarations, optional rejection of
/// undeclared keys, and a freshly built output map.
#[derive(Debug, Default)]
pub struct ObjectSchema {
    modifiers: Modifiers,
    fields: Vec<(String, FieldRule)>,
    deny_additional: bool,
}

impl_modifier_builders!(ObjectSchema);

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field validated by a nested schema. Declaration order is
    /// validation order.
    pub fn field<N, S>(mut self, name: N, schema: S) -> Self
    where
        N: Into<String>,
        S: Schema + 'static,
    {
        self.fields
            .push((name.into(), FieldRule::Schema(Box::new(schema))));
        self
    }

    /// Declare a static field that must be present and structurally equal
    /// to `value`.
    pub fn literal<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.fields
            .push((name.into(), FieldRule::Literal(value.into())));
        self
    }

    /// Reject input keys that are not declared.
    pub fn no_additional_properties(mut self) -> Self {
        self.deny_additional = true;
        self
    }

    fn is_declared(&self, key: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == key)
    }
}

impl Schema for ObjectSchema {
    fn validate(&self, value: &Value) -> ValidationResult {
        let coerced = match coerce_value(value, Target::Object, &self.modifiers) {
            Ok(Coerced::Absent(resolved)) => return ValidationResult::ok_nullable(resolved),
            Ok(Coerced::Value(coerced)) => coerced,
            Err(error) => return ValidationResult::err(error),
        };
        let input = match coerced {
            Value::Object(input) => input,
            _ => unreachable!("coercion to object yielded a non-object"),
        };

        let mut output = Map::new();
        for (name, rule) in &self.fields {
            match (input.get(name), rule) {
                (Some(raw), FieldRule::Schema(schema)) => {
                    match schema.validate(raw).into_result() {
                        Ok(validated) => {
                            output.insert(name.clone(), validated);
                        }
                        Err(error) => {
                            return ValidationResult::err(
                                error.inherit(PathSegment::field(name.as_str())),
                            );
                        }
                    }
                }
                (Some(raw), FieldRule::Literal(literal)) => {
                    if raw != literal {
                        return ValidationResult::err(ValidationError::at(
                            format!("expected {} to equal {}, found {}", name, literal, raw),
                            ValidationKind::Equals,
                            PathSegment::field(name.as_str()),
                        ));
                    }
                    output.insert(name.clone(), literal.clone());
                }
                (None, FieldRule::Schema(schema)) => {
                    if !schema.is_optional() {
                        return ValidationResult::err(ValidationError::at(
                            format!("expected {} to be present", name),
                            ValidationKind::Required,
                            PathSegment::field(name.as_str()),
                        ));
                    }
                    // optional implies nullable: an absent key resolves to
                    // the field's default, or stays absent
                    match schema.validate(&Value::Null).into_result() {
                        Ok(Value::Null) => {}
                        Ok(resolved) => {
                            output.insert(name.clone(), resolved);
                        }
                        Err(error) => {
                            return ValidationResult::err(
                                error.inherit(PathSegment::field(name.as_str())),
                            );
                        }
                    }
                }
                (None, FieldRule::Literal(literal)) => {
                    // literals never participate in the optional logic
                    return ValidationResult::err(ValidationError::at(
                        format!("expected {} to equal {}", name, literal),
                        ValidationKind::Equals,
                        PathSegment::field(name.as_str()),
                    ));
                }
            }
        }

        if self.deny_additional {
            for key in input.keys() {
                if !self.is_declared(key) {
                    return ValidationResult::err(ValidationError::new(
                        format!("unexpected property {}", key),
                        ValidationKind::AdditionalProperties,
                    ));
                }
            }
        }

        ValidationResult::ok(Value::Object(output))
    }

    fn is_optional(&self) -> bool {
        self.modifiers.optional
    }
}

/// Array validator: one child schema applied to every element, with bounds
/// on the element count.
#[derive(Debug)]
pub struct ArraySchema {
    modifiers: Modifiers,
    bounds: BoundsRule,
    item: Box<dyn Schema>,
}

impl_modifier_builders!(ArraySchema);
impl_bounds_builders!(ArraySchema);

impl ArraySchema {
    pub fn new<S: Schema + 'static>(item: S) -> Self {
        Self {
            modifiers: Modifiers::default(),
            bounds: BoundsRule::default(),
            item: Box::new(item),
        }
    }
}

impl Schema for ArraySchema {
    fn validate(&self, value: &Value) -> ValidationResult {
        let coerced = match coerce_value(value, Target::Array, &self.modifiers) {
            Ok(Coerced::Absent(resolved)) => return ValidationResult::ok_nullable(resolved),
            Ok(Coerced::Value(coerced)) => coerced,
            Err(error) => return ValidationResult::err(error),
        };
        let items = match coerced {
            Value::Array(items) => items,
            _ => unreachable!("coercion to array yielded a non-array"),
        };

        if let Err(error) = self.bounds.check(items.len() as f64) {
            return ValidationResult::err(error);
        }

        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.item.validate(item).into_result() {
                Ok(validated) => output.push(validated),
                Err(error) => {
                    return ValidationResult::err(error.inherit(PathSegment::index(index)));
                }
            }
        }
        ValidationResult::ok(Value::Array(output))
    }

    fn is_optional(&self) -> bool {
        self.modifiers.optional
    }
}

/// Union validator: tries each alternative in declared order and returns
/// the first success verbatim.
#[derive(Debug, Default)]
pub struct OneOfSchema {
    modifiers: Modifiers,
    alternatives: Vec<Box<dyn Schema>>,
}

// No `coerce` builder here: alternatives carry their own coercion flags,
// and the union itself never converts the input.
impl OneOfSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept an absent value, resolving it to `Null` (or the configured
    /// default) without trying any alternative.
    pub fn nullable(mut self) -> Self {
        self.modifiers.nullable = true;
        self
    }

    /// Make a missing object key acceptable. Implies `nullable`.
    pub fn optional(mut self) -> Self {
        self.modifiers.set_optional();
        self
    }

    /// Substitute `value` when the input is absent. Implies `nullable`.
    pub fn default_value<V: Into<Value>>(mut self, value: V) -> Self {
        self.modifiers.set_default(value.into());
        self
    }

    /// Append an alternative. Declaration order is trial order.
    pub fn variant<S: Schema + 'static>(mut self, schema: S) -> Self {
        self.alternatives.push(Box::new(schema));
        self
    }
}

impl Schema for OneOfSchema {
    fn validate(&self, value: &Value) -> ValidationResult {
        if self.modifiers.nullable && value.is_null() {
            return ValidationResult::ok_nullable(self.modifiers.resolve_absent());
        }

        let mut causes = Vec::with_capacity(self.alternatives.len());
        for (index, alternative) in self.alternatives.iter().enumerate() {
            let result = alternative.validate(value);
            if result.is_valid() {
                // first success is returned verbatim
                return result;
            }
            if let Some(error) = result.into_error() {
                trace!(alternative = index, %error, "oneOf alternative failed");
                causes.push(error);
            }
        }

        ValidationResult::err(ValidationError::with_cause(
            format!("{} did not match any alternative", value),
            ValidationKind::OneOf,
            causes,
        ))
    }

    fn is_optional(&self) -> bool {
        self.modifiers.optional
    }
}

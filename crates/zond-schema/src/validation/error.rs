//! Result and error model for schema validation
//!
//! Every validation step returns a [`ValidationResult`]: the coerced value on
//! success, or a [`ValidationError`] carrying a path, a kind tag, and a cause
//! chain on failure. Paths grow by prefixing as errors propagate upward from
//! nested schemas, never by appending at the leaf.
//!
//! Copyright (c) 2025 Zond Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The fixed taxonomy of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationKind {
    /// Shape/type mismatch or failed conversion
    Coerce,
    /// Missing mandatory object field
    Required,
    /// Literal-field mismatch
    Equals,
    /// Undeclared object field present
    AdditionalProperties,
    /// Value outside the allowed set
    Enum,
    /// Lower bound violation
    Min,
    /// Upper bound violation
    Max,
    /// Pattern mismatch configured via `regex()`
    Regex,
    /// Pattern mismatch configured via `email()`
    Email,
    /// Pattern mismatch configured via `url()`
    Url,
    /// No union alternative matched; carries nested causes
    OneOf,
}

impl ValidationKind {
    /// The canonical tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::Coerce => "coerce",
            ValidationKind::Required => "required",
            ValidationKind::Equals => "equals",
            ValidationKind::AdditionalProperties => "additionalProperties",
            ValidationKind::Enum => "enum",
            ValidationKind::Min => "min",
            ValidationKind::Max => "max",
            ValidationKind::Regex => "regex",
            ValidationKind::Email => "email",
            ValidationKind::Url => "url",
            ValidationKind::OneOf => "oneOf",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a validation path: an object field name or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object field name
    Field(String),
    /// Array element index
    Index(usize),
}

impl PathSegment {
    /// Segment for an object field.
    pub fn field<S: Into<String>>(name: S) -> Self {
        PathSegment::Field(name.into())
    }

    /// Segment for an array element.
    pub fn index(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// A structured validation failure with path context and a cause chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub struct ValidationError {
    /// Human-readable error message
    pub message: String,
    /// Where in the nested value the failure occurred
    pub path: Vec<PathSegment>,
    /// The validation rule that failed
    pub kind: ValidationKind,
    /// Nested failures, used by union aggregation
    pub cause: Vec<ValidationError>,
}

impl ValidationError {
    /// Create a new leaf error with an empty path.
    pub fn new<M: Into<String>>(message: M, kind: ValidationKind) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            kind,
            cause: Vec::new(),
        }
    }

    /// Create an aggregate error carrying nested causes.
    pub fn with_cause<M: Into<String>>(
        message: M,
        kind: ValidationKind,
        cause: Vec<ValidationError>,
    ) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            kind,
            cause,
        }
    }

    /// Create a leaf error located at a single path segment.
    pub fn at<M: Into<String>>(message: M, kind: ValidationKind, segment: PathSegment) -> Self {
        Self {
            message: message.into(),
            path: vec![segment],
            kind,
            cause: Vec::new(),
        }
    }

    /// Prefix a segment onto the path as validation unwinds from a nested
    /// call back to its parent.
    pub fn inherit(mut self, prefix: PathSegment) -> Self {
        self.path.insert(0, prefix);
        self
    }

    /// A friendly dotted path, or `(root)` when the failure is at the top.
    pub fn formatted_path(&self) -> String {
        if self.path.is_empty() {
            return "(root)".to_string();
        }
        self.path
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.message,
            self.formatted_path(),
            self.kind
        )?;
        for cause in &self.cause {
            write!(f, "\n\t- {}", cause)?;
        }
        Ok(())
    }
}

/// The outcome of one validation step.
///
/// Carries the (possibly coerced) value on success and a [`ValidationError`]
/// on failure. The `nullable` marker records that an absent (`Null`) success
/// value is legitimate; `unwrap`-style access fails loudly when a
/// non-nullable result holds an absent value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    data: Value,
    error: Option<ValidationError>,
    nullable: bool,
}

impl ValidationResult {
    /// A valid result holding a present value.
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            error: None,
            nullable: false,
        }
    }

    /// A valid result produced by a nullable schema; `data` may be `Null`.
    pub fn ok_nullable(data: Value) -> Self {
        Self {
            data,
            error: None,
            nullable: true,
        }
    }

    /// An invalid result.
    pub fn err(error: ValidationError) -> Self {
        Self {
            data: Value::Null,
            error: Some(error),
            nullable: false,
        }
    }

    /// Is the value valid?
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Was the success value produced by a nullable schema?
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The error, if invalid.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Consume the result, yielding the error if invalid.
    pub fn into_error(self) -> Option<ValidationError> {
        self.error
    }

    /// Consume the result, yielding `Ok(value)` or `Err(error)`.
    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self.error {
            None => Ok(self.data),
            Some(error) => Err(error),
        }
    }

    /// Unwrap the value if valid.
    ///
    /// # Panics
    ///
    /// Panics if the result is invalid, or if a non-nullable result holds an
    /// absent value (a schema implementation bug, not a data error).
    pub fn unwrap(self) -> Value {
        match self.error {
            None => self.assert_present(),
            Some(error) => panic!("unwrap called on invalid value: {}", error),
        }
    }

    /// Unwrap the value if valid, otherwise return the default.
    pub fn unwrap_or(self, default: Value) -> Value {
        match self.error {
            None => self.assert_present(),
            Some(_) => default,
        }
    }

    /// Unwrap the value if valid, otherwise panic with the carried error, or
    /// with `msg` when provided.
    ///
    /// # Panics
    ///
    /// Panics if the result is invalid.
    pub fn expect(self, msg: Option<&str>) -> Value {
        match self.error {
            None => self.assert_present(),
            Some(error) => match msg {
                Some(msg) => panic!("{}", msg),
                None => panic!("{}", error),
            },
        }
    }

    /// Mark the result invalid with `error`, discarding any held value.
    pub fn invalidate(&mut self, error: ValidationError) {
        self.error = Some(error);
    }

    /// Merge a nested result into this one.
    ///
    /// A failed `other` makes this result fail with `other`'s error verbatim
    /// (path rewriting is the caller's job, via [`ValidationError::inherit`]);
    /// a successful `other` replaces this result's value.
    pub fn update(&mut self, other: ValidationResult) {
        match other.error {
            Some(error) => self.error = Some(error),
            None => {
                self.data = other.data;
                self.nullable = other.nullable;
            }
        }
    }

    fn assert_present(self) -> Value {
        if !self.nullable {
            assert!(
                !self.data.is_null(),
                "non-nullable result holds an absent value"
            );
        }
        self.data
    }
}

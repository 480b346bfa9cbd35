//! Declarative shape contracts for JSON values.
//!
//! Shapes describe what a pipeline payload must look like: the trigger
//! contract, each step's input bindings, and each step's output. They replace
//! per-call duck-typed lookups with contracts that can be checked when a
//! pipeline is built and enforced when it runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A declarative contract over a JSON value.
///
/// # Examples
///
/// ```
/// use oratorio_core::{Field, Shape};
/// use serde_json::json;
///
/// let shape = Shape::Object(vec![
///     Field::required("title", Shape::String),
///     Field::with_default("length", Shape::Integer, json!(1000)),
/// ]);
///
/// assert!(shape.check(&json!({"title": "Startups"})).is_ok());
/// assert!(shape.check(&json!({"length": 500})).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Any JSON string.
    String,
    /// A JSON integer (no fractional part).
    Integer,
    /// Any JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// Any JSON value; no constraint.
    Any,
    /// A JSON array whose elements all match the inner shape.
    Array(Box<Shape>),
    /// A JSON object with the given fields. Unknown keys are passed through.
    Object(Vec<Field>),
    /// A JSON string restricted to one of the listed values.
    OneOf(Vec<String>),
}

/// A named field inside an object shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as it appears in the JSON object.
    pub name: String,
    /// Shape the field value must match.
    pub shape: Shape,
    /// Whether the field must be present.
    pub required: bool,
    /// Value filled in by [`Shape::conform`] when an optional field is absent.
    pub default: Option<Value>,
}

impl Field {
    /// A field that must be present.
    pub fn required(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            required: true,
            default: None,
        }
    }

    /// A field that may be absent.
    pub fn optional(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            required: false,
            default: None,
        }
    }

    /// An optional field with a default filled in during conformance.
    pub fn with_default(name: impl Into<String>, shape: Shape, default: Value) -> Self {
        Self {
            name: name.into(),
            shape,
            required: false,
            default: Some(default),
        }
    }
}

/// A shape violation, reported with the JSON path where it occurred.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("value at '{}' does not match shape: expected {}, found {}", path, expected, found)]
pub struct ShapeMismatch {
    /// JSON path of the offending value ("$" for the root).
    pub path: String,
    /// Human-readable description of the expected shape.
    pub expected: String,
    /// Human-readable description of what was found.
    pub found: String,
}

impl ShapeMismatch {
    fn new(path: &str, expected: impl Into<String>, found: &Value) -> Self {
        Self {
            path: path.to_string(),
            expected: expected.into(),
            found: describe(found),
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(s) => format!("string \"{}\"", truncate(s)),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

fn truncate(s: &str) -> &str {
    let mut end = s.len().min(40);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

impl Shape {
    /// Convenience constructor for [`Shape::OneOf`].
    pub fn one_of(options: &[&str]) -> Self {
        Self::OneOf(options.iter().map(|s| s.to_string()).collect())
    }

    /// Check a value against this shape without modifying it.
    pub fn check(&self, value: &Value) -> Result<(), ShapeMismatch> {
        self.check_at("$", value)
    }

    /// Check a value and fill in declared defaults for absent optional fields.
    ///
    /// Missing-field errors are reported against the pre-default value, so a
    /// required field can never be satisfied by a default.
    pub fn conform(&self, value: Value) -> Result<Value, ShapeMismatch> {
        let filled = self.fill_defaults(value);
        self.check(&filled)?;
        Ok(filled)
    }

    fn check_at(&self, path: &str, value: &Value) -> Result<(), ShapeMismatch> {
        match self {
            Shape::Any => Ok(()),
            Shape::String => value
                .is_string()
                .then_some(())
                .ok_or_else(|| ShapeMismatch::new(path, "string", value)),
            Shape::Integer => (value.is_i64() || value.is_u64())
                .then_some(())
                .ok_or_else(|| ShapeMismatch::new(path, "integer", value)),
            Shape::Number => value
                .is_number()
                .then_some(())
                .ok_or_else(|| ShapeMismatch::new(path, "number", value)),
            Shape::Boolean => value
                .is_boolean()
                .then_some(())
                .ok_or_else(|| ShapeMismatch::new(path, "boolean", value)),
            Shape::Array(inner) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| ShapeMismatch::new(path, "array", value))?;
                for (i, item) in items.iter().enumerate() {
                    inner.check_at(&format!("{}[{}]", path, i), item)?;
                }
                Ok(())
            }
            Shape::Object(fields) => {
                let map = value
                    .as_object()
                    .ok_or_else(|| ShapeMismatch::new(path, "object", value))?;
                for field in fields {
                    let field_path = format!("{}.{}", path, field.name);
                    match map.get(&field.name) {
                        Some(v) => field.shape.check_at(&field_path, v)?,
                        None if field.required => {
                            return Err(ShapeMismatch {
                                path: field_path,
                                expected: "required field".to_string(),
                                found: "nothing".to_string(),
                            });
                        }
                        None => {}
                    }
                }
                Ok(())
            }
            Shape::OneOf(options) => {
                let s = value
                    .as_str()
                    .ok_or_else(|| ShapeMismatch::new(path, format!("one of {:?}", options), value))?;
                options
                    .iter()
                    .any(|o| o == s)
                    .then_some(())
                    .ok_or_else(|| ShapeMismatch::new(path, format!("one of {:?}", options), value))
            }
        }
    }

    fn fill_defaults(&self, value: Value) -> Value {
        match (self, value) {
            (Shape::Object(fields), Value::Object(mut map)) => {
                for field in fields {
                    match map.remove(&field.name) {
                        Some(v) => {
                            map.insert(field.name.clone(), field.shape.fill_defaults(v));
                        }
                        None => {
                            // Required fields must be supplied by the caller.
                            if !field.required {
                                if let Some(default) = &field.default {
                                    map.insert(field.name.clone(), default.clone());
                                }
                            }
                        }
                    }
                }
                Value::Object(map)
            }
            (Shape::Array(inner), Value::Array(items)) => Value::Array(
                items
                    .into_iter()
                    .map(|item| inner.fill_defaults(item))
                    .collect(),
            ),
            (_, value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn topic_shape() -> Shape {
        Shape::Object(vec![
            Field::required("userInput", Shape::String),
            Field::with_default("length", Shape::Integer, json!(1000)),
            Field::with_default(
                "style",
                Shape::one_of(&["formal", "casual", "technical", "humorous", "poetic"]),
                json!("formal"),
            ),
        ])
    }

    #[test]
    fn missing_required_field_fails() {
        let err = topic_shape().check(&json!({"length": 500})).unwrap_err();
        assert_eq!(err.path, "$.userInput");
    }

    #[test]
    fn conform_fills_defaults() {
        let conformed = topic_shape()
            .conform(json!({"userInput": "startups"}))
            .unwrap();
        assert_eq!(conformed["length"], json!(1000));
        assert_eq!(conformed["style"], json!("formal"));
    }

    #[test]
    fn conform_keeps_explicit_values() {
        let conformed = topic_shape()
            .conform(json!({"userInput": "startups", "length": 500, "style": "casual"}))
            .unwrap();
        assert_eq!(conformed["length"], json!(500));
        assert_eq!(conformed["style"], json!("casual"));
    }

    #[test]
    fn one_of_rejects_unknown_variant() {
        let err = topic_shape()
            .check(&json!({"userInput": "x", "style": "sarcastic"}))
            .unwrap_err();
        assert_eq!(err.path, "$.style");
    }

    #[test]
    fn array_elements_are_checked() {
        let shape = Shape::Array(Box::new(Shape::String));
        assert!(shape.check(&json!(["a", "b"])).is_ok());
        let err = shape.check(&json!(["a", 3])).unwrap_err();
        assert_eq!(err.path, "$[1]");
    }

    #[test]
    fn defaults_never_satisfy_required_fields() {
        let shape = Shape::Object(vec![Field {
            name: "x".to_string(),
            shape: Shape::Integer,
            required: true,
            default: Some(json!(1)),
        }]);
        assert!(shape.conform(json!({})).is_err());
    }
}

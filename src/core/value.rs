//! Property values carried by note frontmatter and queries.
//!
//! Values form a small closed set: text, integer, float, boolean, and lists
//! of those. Anything outside the set (null, nested mappings) has no
//! representation; a key with such a value is simply absent.

use crate::error::{ConstrueError, Result};

/// A single frontmatter property value or query literal.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<PropertyValue>),
}

/// Equality is structural within a kind and never coerces across kinds:
/// `Text("3")` does not equal `Integer(3)`. The two numeric variants
/// compare numerically, so `Integer(3)` equals `Float(3.0)`.
impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        use PropertyValue::*;
        match (self, other) {
            (Text(a), Text(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Integer(i), Float(f)) | (Float(f), Integer(i)) => (*i as f64) == *f,
            (List(a), List(b)) => a == b,
            _ => false,
        }
    }
}

impl PropertyValue {
    /// Convert a YAML value from a note or configuration file.
    ///
    /// Returns `None` for shapes outside the closed set: null, mappings,
    /// and sequences containing a non-convertible element (a partial list
    /// could compare equal to a query list it should not match).
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::String(s) => Some(Self::Text(s.clone())),
            serde_yaml::Value::Bool(b) => Some(Self::Boolean(*b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Integer(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            serde_yaml::Value::Sequence(items) => items
                .iter()
                .map(Self::from_yaml)
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            _ => None,
        }
    }

    /// Convert a JSON value supplied as a tool argument.
    ///
    /// Unlike the YAML path, an unrepresentable value here is the caller's
    /// mistake and is reported instead of swallowed.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(s) => Ok(Self::Text(s.clone())),
            serde_json::Value::Bool(b) => Ok(Self::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(ConstrueError::InvalidQuery(format!(
                        "unsupported number: {}",
                        n
                    )))
                }
            }
            serde_json::Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            serde_json::Value::Null => Err(ConstrueError::InvalidQuery(
                "property values may not be null".to_string(),
            )),
            serde_json::Value::Object(_) => Err(ConstrueError::InvalidQuery(
                "nested objects are not valid property values".to_string(),
            )),
        }
    }
}

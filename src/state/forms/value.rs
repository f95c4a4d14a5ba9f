//! Form field value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name to current value, ordered by field name
pub type FormValues = BTreeMap<String, FieldValue>;

/// Type-safe field values
///
/// `null` deserializes to [`FieldValue::Undefined`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    #[default]
    Undefined,
}

/// The shape a schema expects a field value to have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Array,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
        };
        f.write_str(name)
    }
}

impl FieldValue {
    /// Kind of the held value, `None` when undefined
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            FieldValue::Bool(_) => Some(ValueKind::Boolean),
            FieldValue::Number(_) => Some(ValueKind::Number),
            FieldValue::Text(_) => Some(ValueKind::String),
            FieldValue::List(_) => Some(ValueKind::Array),
            FieldValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, FieldValue::Undefined)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether a list value contains `option`
    pub fn contains(&self, option: &str) -> bool {
        self.as_list()
            .is_some_and(|items| items.iter().any(|item| item == option))
    }

    /// JSON rendering used by the state panels and clipboard export.
    ///
    /// Whole numbers are emitted without a fractional part.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::List(items) => serde_json::Value::from(items.clone()),
            FieldValue::Undefined => serde_json::Value::Null,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(_) => self.to_json().to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
            FieldValue::Undefined => String::new(),
        }
    }
}

/// Values as a JSON object. Undefined fields are left out.
pub fn values_to_json(values: &FormValues) -> serde_json::Value {
    let map = values
        .iter()
        .filter(|(_, v)| !v.is_undefined())
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(map)
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_undefined() {
        assert!(FieldValue::default().is_undefined());
        assert_eq!(FieldValue::default().kind(), None);
    }

    #[test]
    fn test_null_deserializes_to_undefined() {
        let value: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, FieldValue::Undefined);
    }

    #[test]
    fn test_deserialize_picks_matching_variant() {
        let value: FieldValue = serde_json::from_str(r#"["low","high"]"#).unwrap();
        assert_eq!(value, FieldValue::from(vec!["low", "high"]));
        let value: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, FieldValue::Bool(true));
        let value: FieldValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(value, FieldValue::Number(12.5));
    }

    #[test]
    fn test_whole_numbers_render_without_fraction() {
        assert_eq!(FieldValue::from(50).to_json().to_string(), "50");
        assert_eq!(FieldValue::from(2.5).to_json().to_string(), "2.5");
        assert_eq!(FieldValue::from(50).display_value(), "50");
    }

    #[test]
    fn test_contains_only_matches_lists() {
        assert!(FieldValue::from(vec!["high"]).contains("high"));
        assert!(!FieldValue::from("high").contains("high"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::Number.to_string(), "number");
        assert_eq!(FieldValue::from(true).kind(), Some(ValueKind::Boolean));
    }
}

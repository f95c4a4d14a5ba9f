//! Declarative validation schema
//!
//! A [`ValidationSchema`] is an ordered list of [`FieldSchema`]s. Each field
//! schema carries the value kind it expects and an ordered list of rules.
//! [`ValidationSchema::validate`] walks the list and keeps the first failing
//! rule per field.

use super::value::{FieldValue, FormValues, ValueKind};
use std::collections::BTreeMap;

/// Per-field validation failure. Returned as data, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Field name to the first failing rule's error. Valid fields are absent.
pub type FormErrors = BTreeMap<String, ValidationError>;

/// A single declarative constraint
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Fails on undefined or a string that is empty once trimmed
    Required,
    /// Minimum trimmed character count of a string
    MinLength(usize),
    /// Maximum trimmed character count of a string
    MaxLength(usize),
    /// Inclusive lower bound of a number
    Min(f64),
    /// Inclusive upper bound of a number
    Max(f64),
    /// Scalar must equal one of the literals; every array element must
    OneOf(Vec<FieldValue>),
    /// Minimum number of array elements
    MinItems(usize),
    /// Value must be exactly this boolean
    Equals(bool),
}

impl Rule {
    /// Whether `value` satisfies the rule.
    ///
    /// Only `Required` and `Equals` reject an undefined value. Values of the
    /// wrong kind are left to the field's type check.
    pub fn passes(&self, value: &FieldValue) -> bool {
        match self {
            Rule::Required => match value {
                FieldValue::Undefined => false,
                FieldValue::Text(s) => !s.trim().is_empty(),
                _ => true,
            },
            Rule::Equals(expected) => value.as_bool() == Some(*expected),
            _ if value.is_undefined() => true,
            Rule::MinLength(min) => value
                .as_text()
                .map_or(true, |s| s.trim().chars().count() >= *min),
            Rule::MaxLength(max) => value
                .as_text()
                .map_or(true, |s| s.trim().chars().count() <= *max),
            Rule::Min(min) => value.as_number().map_or(true, |n| n >= *min),
            Rule::Max(max) => value.as_number().map_or(true, |n| n <= *max),
            Rule::OneOf(allowed) => match value {
                FieldValue::List(items) => items
                    .iter()
                    .all(|item| allowed.iter().any(|a| a.as_text() == Some(item))),
                scalar => allowed.contains(scalar),
            },
            Rule::MinItems(min) => value.as_list().map_or(true, |items| items.len() >= *min),
        }
    }

    /// Message reported when no custom message was given
    pub fn default_message(&self) -> String {
        match self {
            Rule::Required => "required".to_string(),
            Rule::MinLength(n) => format!("must be at least {n} characters"),
            Rule::MaxLength(n) => format!("must be at most {n} characters"),
            Rule::Min(n) => format!(
                "must be greater than or equal to {}",
                FieldValue::from(*n).display_value()
            ),
            Rule::Max(n) => format!(
                "must be less than or equal to {}",
                FieldValue::from(*n).display_value()
            ),
            Rule::OneOf(allowed) => format!(
                "must be one of: {}",
                allowed
                    .iter()
                    .map(FieldValue::display_value)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Rule::MinItems(n) => format!("at least {n} required"),
            Rule::Equals(expected) => format!("must be {expected}"),
        }
    }
}

/// A rule plus its optional custom message
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub rule: Rule,
    pub message: Option<String>,
}

impl FieldRule {
    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.rule.default_message())
    }
}

/// Expected kind and ordered rules for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub kind: ValueKind,
    pub rules: Vec<FieldRule>,
}

impl FieldSchema {
    pub fn new(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            rules: Vec::new(),
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, ValueKind::String)
    }

    pub fn number(name: &str) -> Self {
        Self::new(name, ValueKind::Number)
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(name, ValueKind::Boolean)
    }

    pub fn array(name: &str) -> Self {
        Self::new(name, ValueKind::Array)
    }

    /// Append a rule with its default message
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(FieldRule {
            rule,
            message: None,
        });
        self
    }

    /// Replace the message of the most recently added rule
    pub fn message(mut self, message: &str) -> Self {
        if let Some(last) = self.rules.last_mut() {
            last.message = Some(message.to_string());
        }
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn min_len(self, min: usize) -> Self {
        self.rule(Rule::MinLength(min))
    }

    pub fn max_len(self, max: usize) -> Self {
        self.rule(Rule::MaxLength(max))
    }

    pub fn min(self, min: f64) -> Self {
        self.rule(Rule::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.rule(Rule::Max(max))
    }

    pub fn one_of<I, S>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldValue>,
    {
        self.rule(Rule::OneOf(allowed.into_iter().map(Into::into).collect()))
    }

    pub fn min_items(self, min: usize) -> Self {
        self.rule(Rule::MinItems(min))
    }

    pub fn equals(self, expected: bool) -> Self {
        self.rule(Rule::Equals(expected))
    }

    /// First failure for `value`, if any.
    ///
    /// A defined value of the wrong kind fails before any rule runs.
    pub fn check(&self, value: &FieldValue) -> Option<ValidationError> {
        if let Some(kind) = value.kind() {
            if kind != self.kind {
                return Some(ValidationError::new(format!("must be a {}", self.kind)));
            }
        }
        self.rules
            .iter()
            .find(|r| !r.rule.passes(value))
            .map(|r| ValidationError::new(r.message()))
    }
}

/// Ordered list of field schemas. Static for the lifetime of a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationSchema {
    fields: Vec<FieldSchema>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Evaluate every field schema against `values`.
    ///
    /// A name missing from `values` is checked as undefined. Result keys are
    /// always schema field names.
    pub fn validate(&self, values: &FormValues) -> FormErrors {
        let undefined = FieldValue::Undefined;
        self.fields
            .iter()
            .filter_map(|field| {
                let value = values.get(&field.name).unwrap_or(&undefined);
                field.check(value).map(|err| (field.name.clone(), err))
            })
            .collect()
    }
}

//! Form state synchronization
//!
//! [`FormState`] is a snapshot of values, errors and touched flags. Every
//! transition consumes the current snapshot and returns the next one, so the
//! caller always renders from a single consistent state.

use super::schema::{FormErrors, ValidationError, ValidationSchema};
use super::value::{values_to_json, FieldValue, FormValues};
use std::collections::BTreeSet;

/// Receiver of a successfully validated submission
#[cfg_attr(test, mockall::automock)]
pub trait SubmitHandler {
    /// Called once per submit attempt that produced no errors
    fn on_valid(&mut self, values: &FormValues);
}

/// Values, errors and touched flags of one form instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: FormValues,
    errors: FormErrors,
    touched: BTreeSet<String>,
    initial_values: FormValues,
    submit_count: u32,
}

impl FormState {
    /// Create a state from default values with no errors and nothing touched
    pub fn initialize(defaults: FormValues) -> Self {
        Self {
            values: defaults.clone(),
            errors: FormErrors::new(),
            touched: BTreeSet::new(),
            initial_values: defaults,
            submit_count: 0,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn touched(&self) -> &BTreeSet<String> {
        &self.touched
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Current value of a field, `Undefined` for unknown names
    pub fn value(&self, name: &str) -> &FieldValue {
        const UNDEFINED: &FieldValue = &FieldValue::Undefined;
        self.values.get(name).unwrap_or(UNDEFINED)
    }

    pub fn error(&self, name: &str) -> Option<&ValidationError> {
        self.errors.get(name)
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// The field's error, but only once the field has been touched
    pub fn visible_error(&self, name: &str) -> Option<&ValidationError> {
        if self.is_touched(name) {
            self.error(name)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Initial value of a field, `Undefined` when it had none
    pub fn initial_value(&self, name: &str) -> &FieldValue {
        const UNDEFINED: &FieldValue = &FieldValue::Undefined;
        self.initial_values.get(name).unwrap_or(UNDEFINED)
    }

    /// Whether values differ from the ones the form was initialized with.
    /// A missing field and an undefined one compare equal.
    pub fn is_dirty(&self) -> bool {
        fn defined(values: &FormValues) -> impl Iterator<Item = (&String, &FieldValue)> {
            values.iter().filter(|(_, v)| !v.is_undefined())
        }
        !defined(&self.values).eq(defined(&self.initial_values))
    }

    /// Set a field's value. Does not mark it touched.
    #[must_use]
    pub fn set_field_value(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn set_field_touched(mut self, name: &str) -> Self {
        self.touched.insert(name.to_string());
        self
    }

    /// Check or uncheck `option` in a multi-select checkbox group.
    ///
    /// Checking appends when absent. Unchecking removes the first occurrence.
    /// A non-list value is treated as an empty group.
    #[must_use]
    pub fn set_checkbox(mut self, name: &str, option: &str, checked: bool) -> Self {
        let mut items = match self.values.remove(name) {
            Some(FieldValue::List(items)) => items,
            _ => Vec::new(),
        };
        let position = items.iter().position(|item| item == option);
        match (checked, position) {
            (true, None) => items.push(option.to_string()),
            (false, Some(index)) => {
                items.remove(index);
            }
            _ => {}
        }
        self.values.insert(name.to_string(), FieldValue::List(items));
        self
    }

    /// Flip `option` in a multi-select checkbox group
    #[must_use]
    pub fn toggle_checkbox(self, name: &str, option: &str) -> Self {
        let checked = self.value(name).contains(option);
        self.set_checkbox(name, option, !checked)
    }

    /// Flip a single boolean checkbox. A non-boolean value becomes `true`.
    #[must_use]
    pub fn toggle_boolean(self, name: &str) -> Self {
        let next = !self.value(name).as_bool().unwrap_or(false);
        self.set_field_value(name, next)
    }

    /// Evaluate `schema` against the current values without touching state
    pub fn validate(&self, schema: &ValidationSchema) -> FormErrors {
        schema.validate(&self.values)
    }

    /// Store a fresh validation result as the state's errors
    #[must_use]
    pub fn revalidate(mut self, schema: &ValidationSchema) -> Self {
        self.errors = self.validate(schema);
        self
    }

    /// Touch every schema field, recompute errors and hand the values to
    /// `handler` when there are none.
    #[must_use]
    pub fn submit(mut self, schema: &ValidationSchema, handler: &mut dyn SubmitHandler) -> Self {
        self.submit_count += 1;
        self.touched
            .extend(schema.field_names().map(str::to_string));
        self = self.revalidate(schema);

        if self.errors.is_empty() {
            tracing::info!(attempt = self.submit_count, "form submitted");
            handler.on_valid(&self.values);
        } else {
            tracing::debug!(
                attempt = self.submit_count,
                fields = ?self.errors.keys().collect::<Vec<_>>(),
                "submit blocked by validation errors"
            );
        }
        self
    }

    /// Back to the initial values with nothing touched
    #[must_use]
    pub fn reset(self) -> Self {
        Self::initialize(self.initial_values)
    }

    /// Values as a JSON object. Undefined fields are left out.
    pub fn values_json(&self) -> serde_json::Value {
        values_to_json(&self.values)
    }

    /// Errors as a JSON object of field name to message
    pub fn errors_json(&self) -> serde_json::Value {
        let map = self
            .errors
            .iter()
            .map(|(k, e)| (k.clone(), serde_json::Value::String(e.message.clone())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

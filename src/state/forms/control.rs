//! Rendered form controls
//!
//! A control binds one on-screen input to one field name. Several controls
//! may share a name (checkbox groups), and controls may exist for fields the
//! schema never validates.

use super::value::FieldValue;

/// One entry of a select control
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: FieldValue,
}

impl SelectOption {
    pub fn new(label: &str, value: impl Into<FieldValue>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Kind of input a control renders
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Text { multiline: bool },
    Number,
    /// Member of a multi-select group; toggles `value` in a list field
    CheckboxOption { value: String },
    /// Single boolean checkbox
    Checkbox,
    Select { options: Vec<SelectOption> },
}

/// Represents a single rendered control and the field it is bound to
#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    pub name: String,
    pub label: String,
    pub kind: ControlKind,
}

impl FormControl {
    fn new(name: &str, label: &str, kind: ControlKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Create a single-line text control
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, ControlKind::Text { multiline: false })
    }

    /// Create a multi-line text control
    pub fn multiline(name: &str, label: &str) -> Self {
        Self::new(name, label, ControlKind::Text { multiline: true })
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, ControlKind::Number)
    }

    /// Create one checkbox of a group sharing `name`
    pub fn checkbox_option(name: &str, value: &str, label: &str) -> Self {
        Self::new(
            name,
            label,
            ControlKind::CheckboxOption {
                value: value.to_string(),
            },
        )
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, ControlKind::Checkbox)
    }

    pub fn select(name: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, ControlKind::Select { options })
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, ControlKind::Text { multiline: true })
    }

    /// Whether typed characters edit this control
    pub fn accepts_text(&self) -> bool {
        matches!(self.kind, ControlKind::Text { .. } | ControlKind::Number)
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(
            self.kind,
            ControlKind::Checkbox | ControlKind::CheckboxOption { .. }
        )
    }

    /// Whether the checkbox is ticked for the bound field's `value`
    pub fn is_checked(&self, value: &FieldValue) -> bool {
        match &self.kind {
            ControlKind::CheckboxOption { value: option } => value.contains(option),
            ControlKind::Checkbox => value.as_bool() == Some(true),
            _ => false,
        }
    }

    /// Option after (or before) the one matching `current`.
    ///
    /// With no match, stepping forward picks the first option and stepping
    /// back picks the last. Wraps around. `None` for non-select controls.
    pub fn step_select(&self, current: &FieldValue, forward: bool) -> Option<&SelectOption> {
        let ControlKind::Select { options } = &self.kind else {
            return None;
        };
        if options.is_empty() {
            return None;
        }
        let len = options.len();
        let next = match options.iter().position(|o| &o.value == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        options.get(next)
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: &FieldValue) -> String {
        match &self.kind {
            ControlKind::Text { .. } | ControlKind::Number => value.display_value(),
            ControlKind::CheckboxOption { .. } | ControlKind::Checkbox => {
                if self.is_checked(value) { "[x]" } else { "[ ]" }.to_string()
            }
            ControlKind::Select { options } => options
                .iter()
                .find(|o| &o.value == value)
                .map(|o| o.label.clone())
                .unwrap_or_default(),
        }
    }
}

//! Application state definitions

use super::forms::{
    account, ControlKind, FieldValue, FormControl, FormState, FormValues, SubmitHandler,
    ValidationSchema,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// When the form revalidates outside of submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationTriggers {
    pub on_change: bool,
    pub on_blur: bool,
}

impl Default for ValidationTriggers {
    fn default() -> Self {
        Self {
            on_change: true,
            on_blur: true,
        }
    }
}

/// A successfully validated submission
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub values: FormValues,
    pub submitted_at: DateTime<Utc>,
}

/// Records accepted submissions
#[derive(Debug, Clone, Default)]
pub struct SubmissionLog {
    pub last: Option<Submission>,
    pub accepted: u32,
}

impl SubmitHandler for SubmissionLog {
    fn on_valid(&mut self, values: &FormValues) {
        self.accepted += 1;
        self.last = Some(Submission {
            values: values.clone(),
            submitted_at: Utc::now(),
        });
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub form: FormState,
    pub schema: ValidationSchema,
    pub controls: Vec<FormControl>,
    /// Index into `controls`; `controls.len()` is the Submit button
    pub active_control: usize,
    /// Raw text of number controls, keyed by field name
    pub number_drafts: HashMap<String, String>,
    pub triggers: ValidationTriggers,
    pub submissions: SubmissionLog,
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ValidationTriggers::default())
    }
}

impl AppState {
    /// State for the account form
    pub fn new(triggers: ValidationTriggers) -> Self {
        Self::with_form(
            account::initial_values(),
            account::schema(),
            account::controls(),
            triggers,
        )
    }

    pub fn with_form(
        defaults: FormValues,
        schema: ValidationSchema,
        controls: Vec<FormControl>,
        triggers: ValidationTriggers,
    ) -> Self {
        Self {
            form: FormState::initialize(defaults),
            schema,
            controls,
            active_control: 0,
            number_drafts: HashMap::new(),
            triggers,
            submissions: SubmissionLog::default(),
            status_message: None,
        }
    }

    /// Number of focus stops, the Submit button included
    pub fn focus_count(&self) -> usize {
        self.controls.len() + 1
    }

    pub fn is_submit_active(&self) -> bool {
        self.active_control == self.controls.len()
    }

    pub fn active(&self) -> Option<&FormControl> {
        self.controls.get(self.active_control)
    }

    /// Text shown inside a control. Number controls show their raw draft.
    pub fn control_text(&self, control: &FormControl) -> String {
        let value = self.form.value(&control.name);
        match control.kind {
            ControlKind::Number => self
                .number_drafts
                .get(&control.name)
                .cloned()
                .unwrap_or_else(|| value.display_value()),
            _ => control.display_value(value),
        }
    }

    /// Whether the control is the last one bound to its field
    pub fn is_last_of_group(&self, index: usize) -> bool {
        match (self.controls.get(index), self.controls.get(index + 1)) {
            (Some(current), Some(next)) => current.name != next.name,
            (Some(_), None) => true,
            _ => false,
        }
    }

    fn update_form(&mut self, f: impl FnOnce(FormState) -> FormState) {
        self.form = f(std::mem::take(&mut self.form));
    }

    fn after_change(&mut self) {
        if self.triggers.on_change {
            let schema = &self.schema;
            self.form = std::mem::take(&mut self.form).revalidate(schema);
        }
    }

    /// Touch the active control's field, as leaving it does
    pub fn blur_active(&mut self) {
        let Some(name) = self.active().map(|c| c.name.clone()) else {
            return;
        };
        self.update_form(|form| form.set_field_touched(&name));
        if self.triggers.on_blur {
            let schema = &self.schema;
            self.form = std::mem::take(&mut self.form).revalidate(schema);
        }
    }

    pub fn next_form_field(&mut self) {
        self.blur_active();
        self.active_control = (self.active_control + 1) % self.focus_count();
    }

    pub fn prev_form_field(&mut self) {
        self.blur_active();
        let count = self.focus_count();
        self.active_control = (self.active_control + count - 1) % count;
    }

    /// Type a character into the active text or number control
    pub fn form_input_char(&mut self, c: char) {
        let Some(control) = self.active().filter(|ctl| ctl.accepts_text()).cloned() else {
            return;
        };
        match control.kind {
            ControlKind::Number => {
                let mut draft = self.control_text(&control);
                draft.push(c);
                self.set_number_draft(&control.name, draft);
            }
            _ => {
                let mut text = self.form.value(&control.name).display_value();
                text.push(c);
                self.update_form(|form| form.set_field_value(&control.name, text));
            }
        }
        self.after_change();
    }

    /// Remove the last character of the active text or number control
    pub fn form_backspace(&mut self) {
        let Some(control) = self.active().filter(|ctl| ctl.accepts_text()).cloned() else {
            return;
        };
        let mut text = self.control_text(&control);
        if text.pop().is_none() {
            return;
        }
        match control.kind {
            ControlKind::Number => self.set_number_draft(&control.name, text),
            _ => {
                // Clearing a field that started without a value leaves it undefined
                let value = if text.is_empty()
                    && self.form.initial_value(&control.name).is_undefined()
                {
                    FieldValue::Undefined
                } else {
                    FieldValue::Text(text)
                };
                self.update_form(|form| form.set_field_value(&control.name, value));
            }
        }
        self.after_change();
    }

    /// Insert a line break into the active control if it is multiline
    pub fn form_newline(&mut self) {
        if self.active().is_some_and(FormControl::is_multiline) {
            self.form_input_char('\n');
        }
    }

    /// Empty draft is undefined, a finite parse is a number, anything else
    /// stays text and fails the schema's type check.
    fn set_number_draft(&mut self, name: &str, draft: String) {
        let value = if draft.trim().is_empty() {
            FieldValue::Undefined
        } else {
            match draft.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => FieldValue::Number(n),
                _ => FieldValue::Text(draft.clone()),
            }
        };
        self.number_drafts.insert(name.to_string(), draft);
        self.update_form(|form| form.set_field_value(name, value));
    }

    /// Toggle the active checkbox
    pub fn toggle_active(&mut self) {
        let Some(control) = self.active().cloned() else {
            return;
        };
        match &control.kind {
            ControlKind::CheckboxOption { value } => {
                self.update_form(|form| form.toggle_checkbox(&control.name, value));
            }
            ControlKind::Checkbox => {
                self.update_form(|form| form.toggle_boolean(&control.name));
            }
            _ => return,
        }
        self.after_change();
    }

    /// Move the active select to its next or previous option
    pub fn step_active_select(&mut self, forward: bool) {
        let Some(control) = self.active().cloned() else {
            return;
        };
        let Some(option) = control.step_select(self.form.value(&control.name), forward) else {
            return;
        };
        let value = option.value.clone();
        self.update_form(|form| form.set_field_value(&control.name, value));
        self.after_change();
    }

    /// Submit the form. Returns whether the submission was accepted.
    pub fn submit(&mut self) -> bool {
        let accepted_before = self.submissions.accepted;
        let form = std::mem::take(&mut self.form);
        self.form = form.submit(&self.schema, &mut self.submissions);

        let accepted = self.submissions.accepted > accepted_before;
        self.status_message = Some(if accepted {
            "Submitted".to_string()
        } else {
            format!("{} field(s) need attention", self.form.errors().len())
        });
        accepted
    }

    /// Start over from the initial values
    pub fn reset_form(&mut self) {
        self.update_form(FormState::reset);
        self.number_drafts.clear();
        self.active_control = 0;
        self.status_message = Some("Form reset".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::account::{
        ACCEPTED_TERMS, COMMENT_ABOUT_INVESTMENT_RISK, DEPENDENTS, FULL_NAME, INITIAL_INVESTMENT,
        INVESTMENT_RISK,
    };
    use crate::state::forms::ValidationError;

    fn focus(state: &mut AppState, name: &str) {
        state.active_control = state
            .controls
            .iter()
            .position(|c| c.name == name)
            .expect("control exists");
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.form_input_char(c);
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_starts_on_first_control() {
            let state = AppState::default();
            assert_eq!(state.active_control, 0);
            assert_eq!(state.active().unwrap().name, FULL_NAME);
            assert!(!state.is_submit_active());
        }

        #[test]
        fn test_next_field_wraps_through_submit() {
            let mut state = AppState::default();
            for _ in 0..state.controls.len() {
                state.next_form_field();
            }
            assert!(state.is_submit_active());
            assert!(state.active().is_none());
            state.next_form_field();
            assert_eq!(state.active_control, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_submit() {
            let mut state = AppState::default();
            state.prev_form_field();
            assert!(state.is_submit_active());
        }

        #[test]
        fn test_leaving_field_touches_and_shows_error() {
            let mut state = AppState::default();
            assert!(state.form.visible_error(FULL_NAME).is_none());
            state.next_form_field();
            assert!(state.form.is_touched(FULL_NAME));
            assert_eq!(
                state.form.visible_error(FULL_NAME),
                Some(&ValidationError::new("required"))
            );
        }

        #[test]
        fn test_blur_without_validation_trigger_keeps_errors_empty() {
            let mut state = AppState::new(ValidationTriggers {
                on_change: false,
                on_blur: false,
            });
            state.next_form_field();
            assert!(state.form.is_touched(FULL_NAME));
            assert!(state.form.errors().is_empty());
        }

        #[test]
        fn test_group_membership() {
            let state = AppState::default();
            let first_risk = state
                .controls
                .iter()
                .position(|c| c.name == INVESTMENT_RISK)
                .unwrap();
            assert!(!state.is_last_of_group(first_risk));
            assert!(state.is_last_of_group(first_risk + 2));
            assert!(state.is_last_of_group(0));
            assert!(!state.is_last_of_group(state.controls.len()));
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn test_typing_updates_text_value_and_revalidates() {
            let mut state = AppState::default();
            type_text(&mut state, "A");
            assert_eq!(state.form.value(FULL_NAME), &FieldValue::from("A"));
            assert_eq!(
                state.form.error(FULL_NAME),
                Some(&ValidationError::new("must be at least 2 characters"))
            );
            type_text(&mut state, "nn");
            assert!(state.form.error(FULL_NAME).is_none());
            state.form_backspace();
            assert_eq!(state.form.value(FULL_NAME), &FieldValue::from("An"));
        }

        #[test]
        fn test_typing_does_not_touch() {
            let mut state = AppState::default();
            type_text(&mut state, "Ann");
            assert!(!state.form.is_touched(FULL_NAME));
        }

        #[test]
        fn test_number_draft_parsing() {
            let mut state = AppState::default();
            focus(&mut state, INITIAL_INVESTMENT);

            type_text(&mut state, "5");
            assert_eq!(state.form.value(INITIAL_INVESTMENT), &FieldValue::from(5));
            type_text(&mut state, ".");
            assert_eq!(state.form.value(INITIAL_INVESTMENT), &FieldValue::from(5));
            assert_eq!(state.control_text(state.active().unwrap()), "5.");
            type_text(&mut state, "x");
            assert_eq!(
                state.form.error(INITIAL_INVESTMENT),
                Some(&ValidationError::new("must be a number"))
            );
            state.form_backspace();
            state.form_backspace();
            state.form_backspace();
            assert!(state.form.value(INITIAL_INVESTMENT).is_undefined());
            assert_eq!(
                state.form.error(INITIAL_INVESTMENT),
                Some(&ValidationError::new("required"))
            );
        }

        #[test]
        fn test_clearing_unseeded_comment_is_not_dirty() {
            let mut state = AppState::default();
            focus(&mut state, COMMENT_ABOUT_INVESTMENT_RISK);
            type_text(&mut state, "ok");
            assert!(state.form.is_dirty());
            state.form_backspace();
            state.form_backspace();
            assert!(state.form.value(COMMENT_ABOUT_INVESTMENT_RISK).is_undefined());
            assert!(!state.form.is_dirty());
        }

        #[test]
        fn test_clearing_seeded_name_keeps_empty_text() {
            let mut state = AppState::default();
            type_text(&mut state, "A");
            state.form_backspace();
            assert_eq!(state.form.value(FULL_NAME), &FieldValue::from(""));
            assert!(!state.form.is_dirty());
        }

        #[test]
        fn test_backspace_on_empty_is_noop() {
            let mut state = AppState::default();
            state.form_backspace();
            assert_eq!(state.form.value(FULL_NAME), &FieldValue::from(""));
            assert!(state.form.errors().is_empty());
        }

        #[test]
        fn test_newline_only_in_multiline() {
            let mut state = AppState::default();
            state.form_newline();
            assert_eq!(state.form.value(FULL_NAME), &FieldValue::from(""));

            let comment = state.controls.iter().position(|c| c.is_multiline()).unwrap();
            state.active_control = comment;
            type_text(&mut state, "a");
            state.form_newline();
            type_text(&mut state, "b");
            let name = state.controls[comment].name.clone();
            assert_eq!(state.form.value(&name), &FieldValue::from("a\nb"));
        }

        #[test]
        fn test_input_ignored_on_checkbox_and_submit() {
            let mut state = AppState::default();
            focus(&mut state, ACCEPTED_TERMS);
            type_text(&mut state, "x");
            assert_eq!(state.form.value(ACCEPTED_TERMS), &FieldValue::from(false));
            state.active_control = state.controls.len();
            type_text(&mut state, "x");
            state.toggle_active();
        }

        #[test]
        fn test_toggling_risk_checkboxes() {
            let mut state = AppState::default();
            let first = state
                .controls
                .iter()
                .position(|c| c.name == INVESTMENT_RISK)
                .unwrap();
            state.active_control = first;
            state.toggle_active();
            state.active_control = first + 1;
            state.toggle_active();
            state.active_control = first;
            state.toggle_active();
            assert_eq!(
                state.form.value(INVESTMENT_RISK),
                &FieldValue::from(vec!["medium"])
            );
        }

        #[test]
        fn test_select_cycles_dependents() {
            let mut state = AppState::default();
            focus(&mut state, DEPENDENTS);
            state.step_active_select(true);
            assert_eq!(state.form.value(DEPENDENTS), &FieldValue::from(-1));
            assert_eq!(
                state.form.error(DEPENDENTS),
                Some(&ValidationError::new("must be greater than or equal to 0"))
            );
            state.step_active_select(true);
            assert_eq!(state.form.value(DEPENDENTS), &FieldValue::from(0));
            assert!(state.form.error(DEPENDENTS).is_none());
        }
    }

    mod submitting {
        use super::*;

        #[test]
        fn test_submit_empty_form_is_rejected() {
            let mut state = AppState::default();
            assert!(!state.submit());
            assert!(state.submissions.last.is_none());
            assert_eq!(
                state.status_message.as_deref(),
                Some("4 field(s) need attention")
            );
            assert!(state.form.visible_error(ACCEPTED_TERMS).is_some());
        }

        #[test]
        fn test_submit_filled_form_records_values() {
            let mut state = AppState::default();
            type_text(&mut state, "Ann");
            focus(&mut state, INITIAL_INVESTMENT);
            type_text(&mut state, "50");
            focus(&mut state, INVESTMENT_RISK);
            state.active_control += 2;
            state.toggle_active();
            focus(&mut state, ACCEPTED_TERMS);
            state.toggle_active();

            assert!(state.submit());
            let submission = state.submissions.last.as_ref().unwrap();
            assert_eq!(submission.values[FULL_NAME], FieldValue::from("Ann"));
            assert_eq!(submission.values[INITIAL_INVESTMENT], FieldValue::from(50));
            assert_eq!(
                submission.values[INVESTMENT_RISK],
                FieldValue::from(vec!["low"])
            );
            assert_eq!(submission.values[ACCEPTED_TERMS], FieldValue::from(true));
            assert_eq!(state.submissions.accepted, 1);
            assert_eq!(state.status_message.as_deref(), Some("Submitted"));
        }

        #[test]
        fn test_reset_clears_drafts_and_focus() {
            let mut state = AppState::default();
            focus(&mut state, INITIAL_INVESTMENT);
            type_text(&mut state, "7");
            state.submit();
            state.reset_form();
            assert_eq!(state.active_control, 0);
            assert!(state.number_drafts.is_empty());
            assert!(state.form.touched().is_empty());
            assert!(!state.form.is_dirty());
        }
    }
}

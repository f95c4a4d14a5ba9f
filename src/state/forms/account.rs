//! The "New Account" form: defaults, schema and rendered controls
//!
//! The schema and the control list are configured independently. The
//! schema validates `dependents` as an optional range, and
//! `commentAboutInvestmentRisk` is rendered without any rules.

use super::control::{FormControl, SelectOption};
use super::schema::{FieldSchema, ValidationSchema};
use super::value::{FieldValue, FormValues};

pub const FULL_NAME: &str = "fullName";
pub const INITIAL_INVESTMENT: &str = "initialInvestment";
pub const INVESTMENT_RISK: &str = "investmentRisk";
pub const COMMENT_ABOUT_INVESTMENT_LIST: &str = "commentAboutInvestmentList";
pub const COMMENT_ABOUT_INVESTMENT_RISK: &str = "commentAboutInvestmentRisk";
pub const DEPENDENTS: &str = "dependents";
pub const ACCEPTED_TERMS: &str = "acceptedTermsAndConditions";

/// Allowed investment risk levels
pub const RISK_LEVELS: [&str; 3] = ["high", "medium", "low"];

/// Values the form starts with
pub fn initial_values() -> FormValues {
    FormValues::from([
        (FULL_NAME.to_string(), FieldValue::from("")),
        (INITIAL_INVESTMENT.to_string(), FieldValue::Undefined),
        (INVESTMENT_RISK.to_string(), FieldValue::List(Vec::new())),
        (COMMENT_ABOUT_INVESTMENT_LIST.to_string(), FieldValue::from("")),
        (ACCEPTED_TERMS.to_string(), FieldValue::from(false)),
    ])
}

pub fn schema() -> ValidationSchema {
    ValidationSchema::new()
        .field(
            FieldSchema::string(FULL_NAME)
                .required()
                .min_len(2)
                .max_len(100),
        )
        .field(
            FieldSchema::number(INITIAL_INVESTMENT)
                .required()
                .min(0.0)
                .max(100.0),
        )
        .field(
            FieldSchema::array(INVESTMENT_RISK)
                .one_of(RISK_LEVELS)
                .min_items(1),
        )
        .field(FieldSchema::number(DEPENDENTS).min(0.0).max(5.0))
        .field(
            FieldSchema::boolean(ACCEPTED_TERMS)
                .equals(true)
                .message("must accept"),
        )
}

/// Controls in render order
pub fn controls() -> Vec<FormControl> {
    let mut dependents = vec![SelectOption::new("Select one", -1)];
    dependents.extend((0..=5).map(|n| SelectOption::new(&n.to_string(), n)));

    vec![
        FormControl::text(FULL_NAME, "full name"),
        FormControl::number(INITIAL_INVESTMENT, "Initial Investment"),
        FormControl::checkbox_option(INVESTMENT_RISK, "high", "high - super risky"),
        FormControl::checkbox_option(INVESTMENT_RISK, "medium", "medium - risky"),
        FormControl::checkbox_option(INVESTMENT_RISK, "low", "low - safe"),
        FormControl::multiline(COMMENT_ABOUT_INVESTMENT_RISK, "comment about investment risk"),
        FormControl::select(DEPENDENTS, "dependents", dependents),
        FormControl::checkbox(ACCEPTED_TERMS, "Accept terms and conditions"),
    ]
}

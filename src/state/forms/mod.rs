//! Form domain layer
//!
//! This module provides the form state synchronizer, the declarative
//! validation schema it evaluates, and the controls that bind to it:
//! - `value`: field values
//! - `schema`: rules and their interpreter
//! - `form_state`: values, errors and touched flags
//! - `control`: rendered inputs bound to field names
//! - `account`: the "New Account" form definition

pub mod account;
mod control;
mod form_state;
mod schema;
mod value;

pub use control::{ControlKind, FormControl};
pub use form_state::{FormState, SubmitHandler};
pub use schema::ValidationSchema;
pub use value::{values_to_json, FieldValue, FormValues};

#[cfg(test)]
pub use schema::ValidationError;

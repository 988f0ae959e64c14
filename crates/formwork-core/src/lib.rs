//! Core runtime for formwork: native values, field definitions, validation,
//! flattened and hydrated errors, related-path mutation, and form sessions.
//!
//! Wire data is `serde_json::Value`; everything in memory is [`value::Value`].

// public exports are one module level down
pub mod error;
pub mod errors;
pub mod field;
pub mod form;
pub mod path;
pub mod reactive;
pub mod validator;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// Prelude
///
/// Authoring vocabulary only: field factories, configs, values, validators.
///

pub mod prelude {
    pub use crate::{
        errors::{FlattenedErrors, NON_FIELD_ERRORS},
        field::{
            ArrayField, ArrayFieldConfig, Field, FieldConfig, FieldKind, FieldSet, FieldSetConfig,
            FieldSetRaw, array_field, boolean_field, char_field, date_field, date_time_field,
            field_set, number_field,
        },
        fields,
        form::{Form, FormDefinition},
        validator::{Validator, ValidatorOutcome, validator_fn},
        value::Value,
    };
}

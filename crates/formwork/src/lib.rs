//! ## Crate layout
//! - `core`: values, field definitions, validation, error trees, related
//!   paths, and form sessions.
//! - `base`: built-in validators and date helpers.
//! - `error`: the public error taxonomy.
//!
//! The `prelude` brings in everything needed to author a field set and drive
//! a form.

pub use formwork_base as base;
pub use formwork_core as core;

pub mod error;

pub use error::Error;

/// re-exports
///
/// wire data and date values cross the public API, so callers get the same
/// versions the crate was built against
pub mod __reexports {
    pub use serde_json;
    pub use time;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use formwork_core::fields;

/// Build a [`FormDefinition`](crate::core::form::FormDefinition), rejecting
/// field names that dotted paths cannot address.
pub fn define(
    raw: core::field::FieldSetRaw,
) -> Result<core::form::FormDefinition, Error> {
    Ok(core::form::FormDefinition::try_new(raw)?)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        base::prelude::*,
        core::{
            errors::{ErrorNode, FieldSetErrors, FlattenedErrors, NON_FIELD_ERRORS},
            field::{
                ArrayField, ArrayFieldConfig, Field, FieldConfig, FieldKind, FieldSet,
                FieldSetConfig, FieldSetRaw, array_field, boolean_field, char_field, date_field,
                date_time_field, field_set, number_field,
            },
            form::{Form, FormDefinition},
            path::PathError,
            validator::{Validator, ValidatorOutcome, validator_fn},
            value::Value,
        },
        define, fields,
    };
    pub use serde_json::json;
}

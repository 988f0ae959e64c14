//! Field definitions: scalar fields, array fields, and field sets.
//!
//! `FieldKind` is the closed set every walker dispatches on. Field sets are
//! authored as a `FieldSetRaw` (directly, or through [`fields!`](crate::fields))
//! and normalized into a `FieldSet` once.

mod array;
mod config;
pub mod convert;
mod scalar;
mod set;

pub use array::ArrayField;
pub use config::{ArrayFieldConfig, DefaultValue, FieldConfig, FieldSetConfig};
pub use scalar::{Field, ScalarKind};
pub use set::FieldSet;

use crate::{
    error::DefinitionError,
    errors::{ErrorList, FlattenedErrors, NON_FIELD_ERRORS},
    value::Value,
};
use serde_json::Value as JsonValue;

///
/// FieldKind
///

#[derive(Clone, Debug)]
pub enum FieldKind {
    Scalar(Field),
    Array(ArrayField),
    Object(FieldSet),
}

impl FieldKind {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Scalar(field) => field.label(),
            Self::Array(array) => array.label(),
            Self::Object(set) => set.label(),
        }
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        match self {
            Self::Scalar(field) => field.is_nullable(),
            Self::Array(array) => array.is_nullable(),
            Self::Object(set) => set.is_nullable(),
        }
    }

    #[must_use]
    pub fn get_default(&self) -> Value {
        match self {
            Self::Scalar(field) => field.get_default(),
            Self::Array(array) => array.get_default(),
            Self::Object(set) => set.get_default(),
        }
    }

    #[must_use]
    pub fn to_native(&self, raw: &JsonValue) -> Value {
        match self {
            Self::Scalar(field) => field.to_native(raw),
            Self::Array(array) => array.to_native(raw),
            Self::Object(set) => set.to_native(raw),
        }
    }

    #[must_use]
    pub fn from_native(&self, value: &Value) -> JsonValue {
        match self {
            Self::Scalar(field) => field.from_native(value),
            Self::Array(array) => array.from_native(value),
            Self::Object(set) => set.from_native(value),
        }
    }

    #[must_use]
    pub fn validate(&self, value: &Value) -> FieldErrors {
        match self {
            Self::Scalar(field) => FieldErrors::List(field.validate(value)),
            Self::Array(array) => FieldErrors::Nested(array.validate_array(value)),
            Self::Object(set) => FieldErrors::Nested(set.validate_field_set(value)),
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayField> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_field_set(&self) -> Option<&FieldSet> {
        match self {
            Self::Object(set) => Some(set),
            _ => None,
        }
    }
}

impl From<Field> for FieldKind {
    fn from(field: Field) -> Self {
        Self::Scalar(field)
    }
}

impl From<ArrayField> for FieldKind {
    fn from(array: ArrayField) -> Self {
        Self::Array(array)
    }
}

impl From<FieldSet> for FieldKind {
    fn from(set: FieldSet) -> Self {
        Self::Object(set)
    }
}

impl From<FieldSetRaw> for FieldKind {
    fn from(raw: FieldSetRaw) -> Self {
        Self::Object(FieldSet::new(raw))
    }
}

///
/// FieldErrors
///
/// Result of validating one entry: a flat list for scalars, a relative
/// path map for arrays and field sets.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldErrors {
    List(ErrorList),
    Nested(FlattenedErrors),
}

impl FieldErrors {
    /// Store under `path` (scalars) or re-key under `"<path>.<key>"`.
    pub fn merge_into(self, path: &str, out: &mut FlattenedErrors) {
        match self {
            Self::List(errors) => out.set(path, errors),
            Self::Nested(nested) => {
                out.extend_prefixed(path, nested);
            }
        }
    }
}

///
/// RawEntry
///

#[derive(Clone, Debug)]
pub enum RawEntry {
    Field(FieldKind),
    Nested(FieldSetRaw),
}

///
/// FieldSetRaw
///
/// Un-normalized field set as authored. Declaration order is kept; a
/// repeated name replaces the earlier entry in place.
///

#[derive(Clone, Debug, Default)]
pub struct FieldSetRaw {
    entries: Vec<(String, RawEntry)>,
}

impl FieldSetRaw {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, field: impl Into<FieldKind>) -> Self {
        self.push_field(name, field);
        self
    }

    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, raw: Self) -> Self {
        self.push_nested(name, raw);
        self
    }

    pub fn push_field(&mut self, name: impl Into<String>, field: impl Into<FieldKind>) {
        self.insert(name.into(), RawEntry::Field(field.into()));
    }

    pub fn push_nested(&mut self, name: impl Into<String>, raw: Self) {
        self.insert(name.into(), RawEntry::Nested(raw));
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<(String, RawEntry)> {
        self.entries
    }

    /// Reject names that dotted paths cannot address: empty names, names
    /// containing `.`, all-digit names, and the reserved error key.
    pub fn check_names(&self) -> Result<(), DefinitionError> {
        for (name, entry) in &self.entries {
            check_name(name)?;

            match entry {
                RawEntry::Nested(raw) => raw.check_names(),
                RawEntry::Field(kind) => check_kind(kind),
            }
            .map_err(|err| err.within(name))?;
        }

        Ok(())
    }

    fn insert(&mut self, name: String, entry: RawEntry) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((name, entry)),
        }
    }
}

fn check_name(name: &str) -> Result<(), DefinitionError> {
    if name == NON_FIELD_ERRORS {
        return Err(DefinitionError::ReservedName {
            name: name.to_string(),
        });
    }

    if name.is_empty() || name.contains('.') || name.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DefinitionError::InvalidName {
            name: name.to_string(),
        });
    }

    Ok(())
}

fn check_kind(kind: &FieldKind) -> Result<(), DefinitionError> {
    match kind {
        FieldKind::Scalar(_) => Ok(()),
        FieldKind::Array(array) => check_kind(array.base()),
        FieldKind::Object(set) => {
            for (name, child) in set.iter() {
                check_name(name)?;
                check_kind(child).map_err(|err| err.within(name))?;
            }

            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

#[must_use]
pub const fn boolean_field(config: FieldConfig) -> Field {
    Field::new(ScalarKind::Boolean, config)
}

#[must_use]
pub const fn char_field(config: FieldConfig) -> Field {
    Field::new(ScalarKind::Char, config)
}

#[must_use]
pub const fn number_field(config: FieldConfig) -> Field {
    Field::new(ScalarKind::Number, config)
}

#[must_use]
pub const fn date_field(config: FieldConfig) -> Field {
    Field::new(ScalarKind::Date, config)
}

#[must_use]
pub const fn date_time_field(config: FieldConfig) -> Field {
    Field::new(ScalarKind::DateTime, config)
}

pub fn array_field(base: impl Into<FieldKind>, config: ArrayFieldConfig) -> ArrayField {
    ArrayField::new(base, config)
}

#[must_use]
pub fn field_set(raw: FieldSetRaw) -> FieldSet {
    FieldSet::new(raw)
}

/// Build a [`FieldSetRaw`].
///
/// `name: expr` adds a field kind, `name: { ... }` adds a nested raw set.
#[macro_export]
macro_rules! fields {
    (@acc $raw:ident;) => {};

    (@acc $raw:ident; $name:ident : { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $raw = $raw.nested(stringify!($name), $crate::fields!($($inner)*));
        $( $crate::fields!(@acc $raw; $($rest)*); )?
    };

    (@acc $raw:ident; $name:ident : $field:expr $(, $($rest:tt)*)?) => {
        $raw = $raw.with(stringify!($name), $field);
        $( $crate::fields!(@acc $raw; $($rest)*); )?
    };

    ($($body:tt)*) => {{
        #[allow(unused_mut)]
        let mut raw = $crate::field::FieldSetRaw::new();
        $crate::fields!(@acc raw; $($body)*);
        raw
    }};
}

///
/// TESTS
///

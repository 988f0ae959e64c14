use crate::{
    error::DefinitionError,
    field::{FieldSet, FieldSetRaw},
    form::Form,
    value::Value,
};
use log::warn;
use serde_json::Value as JsonValue;
use std::sync::Arc;

///
/// FormDefinition
///
/// A field set authored once and shared by every form created from it.
///

#[derive(Clone, Debug)]
pub struct FormDefinition {
    field_set: Arc<FieldSet>,
}

impl FormDefinition {
    pub fn new(field_set: impl Into<FieldSet>) -> Self {
        Self {
            field_set: Arc::new(field_set.into()),
        }
    }

    /// Build from a raw set, rejecting names dotted paths cannot address.
    pub fn try_new(raw: FieldSetRaw) -> Result<Self, DefinitionError> {
        Ok(Self {
            field_set: Arc::new(FieldSet::try_new(raw)?),
        })
    }

    #[must_use]
    pub fn field_set(&self) -> &FieldSet {
        &self.field_set
    }

    /// Fresh defaults with `initial` merged over the top level.
    #[must_use]
    pub fn new_form(&self, initial: Option<Value>) -> Form {
        let mut data = self.field_set.get_default();

        if let Some(initial) = initial {
            if data.is_null() {
                data = initial;
            } else {
                let kind = initial.kind_name();
                if !data.merge_shallow(initial) {
                    warn!("new form: cannot merge {kind} initial data over defaults; ignoring it");
                }
            }
        }

        Form::new(Arc::clone(&self.field_set), data)
    }

    /// Form holding wire data converted to native values.
    #[must_use]
    pub fn from_wire(&self, raw: &JsonValue) -> Form {
        Form::new(Arc::clone(&self.field_set), self.field_set.to_native(raw))
    }
}

///
/// TESTS
///

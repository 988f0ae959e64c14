//! Form sessions: one live copy of a field set's data with its local and
//! remote errors.

mod definition;

pub use definition::FormDefinition;

use crate::{
    errors::{ErrorList, FieldSetErrors, FlattenedErrors, flatten_remote_errors, hydrate},
    field::FieldSet,
    path::{self, PathError},
    reactive::{Memo, Observable, SubscriptionId},
    value::Value,
};
use log::debug;
use serde_json::Value as JsonValue;
use std::{rc::Rc, sync::Arc};

// data, validation and remote revisions the tree was built from
type ErrorStamp = (u64, u64, u64);

///
/// Form
///
/// Single owner of its data. Local validation errors and remote (server)
/// errors are stored apart and merged on read, local first.
///

#[derive(Debug)]
pub struct Form {
    field_set: Arc<FieldSet>,
    data: Observable<Value>,
    validation_errors: Observable<FlattenedErrors>,
    remote_errors: Observable<FlattenedErrors>,
    errors: Memo<ErrorStamp, FieldSetErrors>,
}

impl Form {
    #[must_use]
    pub fn new(field_set: Arc<FieldSet>, data: Value) -> Self {
        Self {
            field_set,
            data: Observable::new(data),
            validation_errors: Observable::default(),
            remote_errors: Observable::default(),
            errors: Memo::new(),
        }
    }

    #[must_use]
    pub fn field_set(&self) -> &FieldSet {
        &self.field_set
    }

    // ------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn data(&self) -> &Value {
        self.data.get()
    }

    pub fn set_data(&mut self, data: Value) {
        self.data.set(data);
    }

    pub fn update_data<R>(&mut self, f: impl FnOnce(&mut Value) -> R) -> R {
        self.data.update(f)
    }

    /// Replace the data with converted wire data.
    pub fn load_wire(&mut self, raw: &JsonValue) {
        let data = self.field_set.to_native(raw);
        self.data.set(data);
    }

    #[must_use]
    pub fn to_wire(&self) -> JsonValue {
        self.field_set.from_native(self.data.get())
    }

    pub fn on_data_change(&mut self, callback: impl FnMut(&Value) + 'static) -> SubscriptionId {
        self.data.subscribe(callback)
    }

    pub fn off_data_change(&mut self, id: SubscriptionId) -> bool {
        self.data.unsubscribe(id)
    }

    /// Fresh defaults and no errors.
    pub fn reset(&mut self) {
        self.data.set(self.field_set.get_default());
        self.reset_errors();
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    /// Replace the local validation errors; remote errors are kept.
    /// Returns `true` when nothing was reported.
    pub fn validate(&mut self) -> bool {
        let errors = self.field_set.validate_field_set(self.data.get());
        let valid = !errors.has_any();
        debug!(
            "form validated: {} paths, {}",
            errors.len(),
            if valid { "clean" } else { "with errors" }
        );
        self.validation_errors.set(errors);

        valid
    }

    /// Clear local and remote errors together.
    pub fn reset_errors(&mut self) {
        self.validation_errors.set(FlattenedErrors::new());
        self.remote_errors.set(FlattenedErrors::new());
    }

    #[must_use]
    pub const fn validation_errors(&self) -> &FlattenedErrors {
        self.validation_errors.get()
    }

    #[must_use]
    pub const fn remote_errors(&self) -> &FlattenedErrors {
        self.remote_errors.get()
    }

    /// Store a server error payload shaped like the field set.
    pub fn set_remote_errors(&mut self, payload: &JsonValue) {
        let errors = flatten_remote_errors(&self.field_set, payload);
        self.remote_errors.set(errors);
    }

    pub fn set_remote_flat_errors(&mut self, errors: FlattenedErrors) {
        self.remote_errors.set(errors);
    }

    /// Local then remote messages for an exact path.
    #[must_use]
    pub fn flat_errors(&self, path: &str) -> ErrorList {
        merged(self.validation_errors.get(), self.remote_errors.get(), path)
    }

    /// Error tree mirroring the field set and the current data.
    /// Rebuilt only after the data or either error source changed.
    #[must_use]
    pub fn errors(&self) -> Rc<FieldSetErrors> {
        let stamp = (
            self.data.revision(),
            self.validation_errors.revision(),
            self.remote_errors.revision(),
        );

        self.errors.get_or_compute(stamp, || {
            let local = self.validation_errors.get();
            let remote = self.remote_errors.get();

            hydrate(&self.field_set, self.data.get(), &|path: &str| {
                merged(local, remote, path)
            })
        })
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.validation_errors.get().has_any() || self.remote_errors.get().has_any()
    }

    /// True if any of `paths` carries a message. A trailing `*` matches
    /// every path starting with the text before it.
    #[must_use]
    pub fn has_field_errors(&self, paths: &[&str]) -> bool {
        let sources = [self.validation_errors.get(), self.remote_errors.get()];

        paths.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => sources.iter().any(|errors| errors.has_prefix(prefix)),
            None => sources
                .iter()
                .any(|errors| !errors.get_list(pattern).is_empty()),
        })
    }

    // ------------------------------------------------------------------
    // Related paths
    // ------------------------------------------------------------------

    pub fn get_related(&self, path: &str) -> Result<Value, PathError> {
        path::get_related(&self.field_set, path)
    }

    /// Append to the list at `path`; see [`path::push_related`].
    pub fn push_related(
        &mut self,
        path: &str,
        indices: &[usize],
        value: Option<Value>,
    ) -> Result<Value, PathError> {
        let field_set = &self.field_set;

        self.data
            .try_update(|data| path::push_related(field_set, data, path, indices, value))
    }

    /// Remove from the list at `path`; see [`path::remove_related`].
    pub fn remove_related(&mut self, path: &str, indices: &[usize]) -> Result<Value, PathError> {
        self.data
            .try_update(|data| path::remove_related(data, path, indices))
    }
}

fn merged(local: &FlattenedErrors, remote: &FlattenedErrors, path: &str) -> ErrorList {
    local
        .get_list(path)
        .iter()
        .chain(remote.get_list(path))
        .cloned()
        .collect()
}

///
/// TESTS
///

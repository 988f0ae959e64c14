//! Path-keyed validation errors and their tree-shaped projection.

mod remote;
mod tree;

pub use remote::flatten_remote_errors;
pub use tree::{ArrayErrors, ErrorNode, FieldSetErrors, hydrate};

use derive_more::{Deref, DerefMut, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// CONSTANTS
///

/// Reserved leaf key for object-level and array-level complaints.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Messages reported for one path.
pub type ErrorList = Vec<String>;

/// Join path segments with `.`.
#[must_use]
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}

///
/// FlattenedErrors
///
/// Dotted path → messages, the canonical error representation.
/// A key exists only if the producing pass reported something at that exact
/// path (possibly an empty list); absence means "clean".
///

#[derive(
    Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, IntoIterator, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct FlattenedErrors(BTreeMap<String, ErrorList>);

impl FlattenedErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Store `errors` under `path`, replacing anything already there.
    pub fn set(&mut self, path: impl Into<String>, errors: ErrorList) {
        self.0.insert(path.into(), errors);
    }

    /// Append messages under `path`, creating the entry if needed.
    pub fn append(&mut self, path: impl Into<String>, errors: ErrorList) {
        self.0.entry(path.into()).or_default().extend(errors);
    }

    /// Messages at `path`, or an empty slice when the path is clean.
    #[must_use]
    pub fn get_list(&self, path: &str) -> &[String] {
        self.0.get(path).map_or(&[], Vec::as_slice)
    }

    /// Merge `other` into `self`, re-keying each entry as `"<prefix>.<key>"`.
    pub fn extend_prefixed(&mut self, prefix: &str, other: Self) -> &mut Self {
        for (key, errors) in other {
            self.0.insert(format!("{prefix}.{key}"), errors);
        }

        self
    }

    /// True if any path carries at least one message.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.0.values().any(|errors| !errors.is_empty())
    }

    /// True if any non-empty entry's path starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0
            .iter()
            .any(|(key, errors)| key.starts_with(prefix) && !errors.is_empty())
    }

    /// Drop entries with no messages.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.0.retain(|_, errors| !errors.is_empty());
        self
    }
}

impl<K: Into<String>> FromIterator<(K, ErrorList)> for FlattenedErrors {
    fn from_iter<I: IntoIterator<Item = (K, ErrorList)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

///
/// TESTS
///

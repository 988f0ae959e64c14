//! Related paths: dotted field paths where a `0` segment stands for "the next
//! caller-supplied index" at that array depth.
//!
//! Paths are parsed once into segments. Schema walks (`schema_default`)
//! ignore indices; data walks (`resolve_list_mut`) consume them left to right.

use crate::{
    field::{FieldKind, FieldSet},
    value::Value,
};
use log::error;
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

/// Segment text that marks an index placeholder.
pub const INDEX_PLACEHOLDER: &str = "0";

///
/// PathError
///
/// Malformed related paths and failed traversals.
/// Data is never modified when one of these is returned.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("related path is empty")]
    Empty,

    #[error("related path '{path}' contains an empty segment")]
    EmptySegment { path: String },

    #[error("related path '{path}' needs {expected} indices, got {actual}")]
    IndexCount {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("related path '{path}': no field named '{field}'")]
    UnknownField { path: String, field: String },

    #[error("related path '{path}': '{field}' is not an array field")]
    NotAnArrayField { path: String, field: String },

    #[error("related path '{path}': '{field}' is not a field set")]
    NotAFieldSet { path: String, field: String },

    #[error("related path '{path}': data has no value at '{at}'")]
    MissingTarget { path: String, at: String },

    #[error("related path '{path}': data at '{at}' is not a list")]
    NotAList { path: String, at: String },

    #[error("related path '{path}': index {index} out of bounds (len {len}) at '{at}'")]
    IndexOutOfBounds {
        path: String,
        at: String,
        index: usize,
        len: usize,
    },
}

///
/// Segment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    Key(String),
    Index,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index => f.write_str(INDEX_PLACEHOLDER),
        }
    }
}

///
/// RelatedPath
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelatedPath {
    raw: String,
    segments: Vec<Segment>,
}

impl RelatedPath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let segments = raw
            .split('.')
            .map(|segment| match segment {
                "" => Err(PathError::EmptySegment {
                    path: raw.to_string(),
                }),
                INDEX_PLACEHOLDER => Ok(Segment::Index),
                key => Ok(Segment::Key(key.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of indices a data walk consumes.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Index))
            .count()
    }

    /// Definition addressed by this path, with each placeholder descending
    /// into the array's base.
    pub fn resolve_kind<'a>(&self, field_set: &'a FieldSet) -> Result<&'a FieldKind, PathError> {
        let mut current: Option<&FieldKind> = None;
        let mut last_key = "";

        for segment in &self.segments {
            match segment {
                Segment::Key(name) => {
                    let set = match current {
                        None => field_set,
                        Some(FieldKind::Object(set)) => set,
                        Some(_) => {
                            return Err(PathError::NotAFieldSet {
                                path: self.raw.clone(),
                                field: last_key.to_string(),
                            });
                        }
                    };

                    current = Some(set.get(name).ok_or_else(|| PathError::UnknownField {
                        path: self.raw.clone(),
                        field: name.clone(),
                    })?);
                    last_key = name.as_str();
                }
                Segment::Index => match current {
                    Some(FieldKind::Array(array)) => current = Some(array.base()),
                    _ => {
                        return Err(PathError::NotAnArrayField {
                            path: self.raw.clone(),
                            field: last_key.to_string(),
                        });
                    }
                },
            }
        }

        current.ok_or(PathError::Empty)
    }

    /// Default for a new element at this path: the base default when the
    /// path ends at an array field, the field's own default otherwise.
    pub fn schema_default(&self, field_set: &FieldSet) -> Result<Value, PathError> {
        let kind = self.resolve_kind(field_set)?;

        Ok(match kind {
            FieldKind::Array(array) => array.base().get_default(),
            other => other.get_default(),
        })
    }

    /// Walk live data to the list this path names, substituting `indices`
    /// for placeholders in order.
    pub fn resolve_list_mut<'a>(
        &self,
        data: &'a mut Value,
        indices: &[usize],
    ) -> Result<&'a mut Vec<Value>, PathError> {
        let expected = self.placeholder_count();
        if indices.len() != expected {
            return Err(PathError::IndexCount {
                path: self.raw.clone(),
                expected,
                actual: indices.len(),
            });
        }

        let mut indices = indices.iter().copied();
        let mut walked: Vec<String> = Vec::with_capacity(self.segments.len());
        let mut current = data;

        for segment in &self.segments {
            match segment {
                Segment::Key(name) => {
                    walked.push(name.clone());
                    current = current
                        .get_mut(name)
                        .ok_or_else(|| PathError::MissingTarget {
                            path: self.raw.clone(),
                            at: walked.join("."),
                        })?;
                }
                Segment::Index => {
                    let index = indices.next().unwrap_or_default();
                    let at = walked.join(".");
                    let list = current.as_list_mut().ok_or_else(|| PathError::NotAList {
                        path: self.raw.clone(),
                        at: at.clone(),
                    })?;
                    let len = list.len();

                    current = list.get_mut(index).ok_or_else(|| PathError::IndexOutOfBounds {
                        path: self.raw.clone(),
                        at,
                        index,
                        len,
                    })?;
                    walked.push(index.to_string());
                }
            }
        }

        current.as_list_mut().ok_or_else(|| PathError::NotAList {
            path: self.raw.clone(),
            at: walked.join("."),
        })
    }
}

impl FromStr for RelatedPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RelatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn logged<T>(result: Result<T, PathError>) -> Result<T, PathError> {
    result.inspect_err(|err| error!("{err}"))
}

/// Default value for a new element at `path`.
pub fn get_related(field_set: &FieldSet, path: &str) -> Result<Value, PathError> {
    logged(RelatedPath::parse(path).and_then(|path| path.schema_default(field_set)))
}

/// Append `value` (or the path's schema default) to the list at `path`.
/// Returns the appended value.
pub fn push_related(
    field_set: &FieldSet,
    data: &mut Value,
    path: &str,
    indices: &[usize],
    value: Option<Value>,
) -> Result<Value, PathError> {
    logged(try_push(field_set, data, path, indices, value))
}

/// Remove one element from the list at `path`. The last index picks the
/// element; the others fill the placeholders. Returns the removed value.
pub fn remove_related(data: &mut Value, path: &str, indices: &[usize]) -> Result<Value, PathError> {
    logged(try_remove(data, path, indices))
}

fn try_push(
    field_set: &FieldSet,
    data: &mut Value,
    path: &str,
    indices: &[usize],
    value: Option<Value>,
) -> Result<Value, PathError> {
    let path = RelatedPath::parse(path)?;
    let value = match value {
        Some(value) => value,
        None => path.schema_default(field_set)?,
    };

    path.resolve_list_mut(data, indices)?.push(value.clone());

    Ok(value)
}

fn try_remove(data: &mut Value, path: &str, indices: &[usize]) -> Result<Value, PathError> {
    let path = RelatedPath::parse(path)?;
    let Some((&index, placeholders)) = indices.split_last() else {
        return Err(PathError::IndexCount {
            path: path.as_str().to_string(),
            expected: path.placeholder_count() + 1,
            actual: 0,
        });
    };

    // the removal index is part of the count callers supply
    let list = path
        .resolve_list_mut(data, placeholders)
        .map_err(|err| match err {
            PathError::IndexCount {
                path,
                expected,
                actual,
            } => PathError::IndexCount {
                path,
                expected: expected + 1,
                actual: actual + 1,
            },
            other => other,
        })?;

    if index >= list.len() {
        return Err(PathError::IndexOutOfBounds {
            path: path.as_str().to_string(),
            at: path.as_str().to_string(),
            index,
            len: list.len(),
        });
    }

    Ok(list.remove(index))
}

///
/// TESTS
///

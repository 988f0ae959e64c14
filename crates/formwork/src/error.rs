use derive_more::Display;
use formwork_core::{Error as CoreError, error::DefinitionError, path::PathError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Definition(err) => err.into(),
            CoreError::Path(err) => err.into(),
        }
    }
}

impl From<DefinitionError> for Error {
    fn from(err: DefinitionError) -> Self {
        let kind = match err.leaf() {
            DefinitionError::ReservedName { .. } => DefinitionErrorKind::ReservedName,
            DefinitionError::InvalidName { .. } | DefinitionError::Context { .. } => {
                DefinitionErrorKind::InvalidName
            }
        };

        Self::new(
            ErrorKind::Definition(kind),
            ErrorOrigin::FieldSet,
            err.to_string(),
        )
    }
}

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        let kind = match &err {
            PathError::Empty | PathError::EmptySegment { .. } => PathErrorKind::Malformed,
            PathError::IndexCount { .. } => PathErrorKind::IndexCount,
            PathError::UnknownField { .. }
            | PathError::NotAnArrayField { .. }
            | PathError::NotAFieldSet { .. } => PathErrorKind::Schema,
            PathError::MissingTarget { .. }
            | PathError::NotAList { .. }
            | PathError::IndexOutOfBounds { .. } => PathErrorKind::Data,
        };

        Self::new(ErrorKind::Path(kind), ErrorOrigin::RelatedPath, err.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Definition(DefinitionErrorKind),
    Path(PathErrorKind),
}

///
/// DefinitionErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DefinitionErrorKind {
    /// A field uses the aggregate error key as its name.
    ReservedName,

    /// A field name is empty, dotted, or all digits.
    InvalidName,
}

///
/// PathErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PathErrorKind {
    /// The path text itself is malformed.
    Malformed,

    /// Caller supplied the wrong number of indices.
    IndexCount,

    /// The path does not match the field set.
    Schema,

    /// The live data does not contain the addressed list or element.
    Data,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    FieldSet,
    RelatedPath,
}

///
/// TESTS
///

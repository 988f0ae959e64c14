use crate::path::PathError;
use thiserror::Error as ThisError;

///
/// Error
///
/// Umbrella for the failures the core reports as `Err`.
/// Conversion problems and validation failures are never errors here; they
/// are logged fallbacks and error lists respectively.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Path(#[from] PathError),
}

///
/// DefinitionError
///
/// A field set that dotted paths could not address.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DefinitionError {
    #[error("field name '{name}' is reserved for aggregate errors")]
    ReservedName { name: String },

    #[error("field name '{name}' is not addressable by a dotted path")]
    InvalidName { name: String },

    #[error("invalid field set at {path}: {source}")]
    Context {
        path: String,
        #[source]
        source: Box<Self>,
    },
}

impl DefinitionError {
    /// Prepend an enclosing field name to the error location.
    #[must_use]
    pub fn within(self, name: &str) -> Self {
        match self {
            Self::Context { path, source } => Self::Context {
                path: format!("{name}.{path}"),
                source,
            },
            source => Self::Context {
                path: name.to_string(),
                source: Box::new(source),
            },
        }
    }

    /// Innermost, non-context variant.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.leaf(),
            _ => self,
        }
    }
}

///
/// TESTS
///

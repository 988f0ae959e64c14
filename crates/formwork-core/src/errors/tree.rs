use crate::{
    errors::{ErrorList, NON_FIELD_ERRORS},
    field::{ArrayField, FieldKind, FieldSet},
    value::Value,
};
use log::trace;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// FieldSetErrors
///
/// Error tree for one field set level. `non_field_errors` is always present
/// and sits beside the per-field nodes when serialized.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FieldSetErrors {
    pub non_field_errors: ErrorList,

    #[serde(flatten)]
    pub fields: BTreeMap<String, ErrorNode>,
}

impl FieldSetErrors {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ErrorNode> {
        self.fields.get(name)
    }

    /// Node at a dotted path (`"users.0.pictures"`).
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&ErrorNode> {
        let mut segments = path.split('.');
        let first = self.fields.get(segments.next()?)?;

        segments.try_fold(first, |node, segment| node.child(segment))
    }

    /// Messages at a dotted path, using the same keys as the flattened map.
    ///
    /// Leaf paths return the field's list; paths ending in
    /// `non_field_errors` return the aggregate list of their parent.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&[String]> {
        match path.rsplit_once('.') {
            None if path == NON_FIELD_ERRORS => Some(&self.non_field_errors),
            Some((parent, NON_FIELD_ERRORS)) => self.node(parent)?.non_field_errors(),
            _ => self.node(path)?.messages(),
        }
    }

    /// True if any list anywhere in the tree is non-empty.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.non_field_errors.is_empty() || self.fields.values().any(ErrorNode::has_errors)
    }
}

///
/// ArrayErrors
///
/// One node per element currently present in the data, plus the
/// aggregate list for array-wide complaints.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ArrayErrors {
    pub non_field_errors: ErrorList,
    pub items: Vec<ErrorNode>,
}

impl ArrayErrors {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

///
/// ErrorNode
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorNode {
    Field(ErrorList),
    Array(ArrayErrors),
    Object(FieldSetErrors),
}

impl ErrorNode {
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&Self> {
        match self {
            Self::Field(_) => None,
            Self::Array(array) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| array.items.get(index)),
            Self::Object(set) => set.fields.get(segment),
        }
    }

    /// Leaf messages; `None` for container nodes.
    #[must_use]
    pub fn messages(&self) -> Option<&[String]> {
        match self {
            Self::Field(errors) => Some(errors),
            _ => None,
        }
    }

    /// Aggregate messages; `None` for leaves.
    #[must_use]
    pub fn non_field_errors(&self) -> Option<&[String]> {
        match self {
            Self::Field(_) => None,
            Self::Array(array) => Some(&array.non_field_errors),
            Self::Object(set) => Some(&set.non_field_errors),
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayErrors> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&FieldSetErrors> {
        match self {
            Self::Object(set) => Some(set),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        match self {
            Self::Field(errors) => !errors.is_empty(),
            Self::Array(array) => {
                !array.non_field_errors.is_empty() || array.items.iter().any(Self::has_errors)
            }
            Self::Object(set) => set.has_errors(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hydration
// ---------------------------------------------------------------------------

/// Project flattened errors onto the shape of `field_set`.
///
/// `lookup` returns the messages for an exact dotted path (empty when
/// clean). Array nodes follow the length of the live `data`, not any
/// configured initial length.
pub fn hydrate(
    field_set: &FieldSet,
    data: &Value,
    lookup: &dyn Fn(&str) -> ErrorList,
) -> FieldSetErrors {
    trace!("hydrating error tree over {} root fields", field_set.len());

    hydrate_set(field_set, data, "", lookup)
}

fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn hydrate_set(
    set: &FieldSet,
    data: &Value,
    prefix: &str,
    lookup: &dyn Fn(&str) -> ErrorList,
) -> FieldSetErrors {
    let fields = set
        .iter()
        .map(|(name, kind)| {
            let value = data.get(name).unwrap_or(&Value::Null);
            let node = hydrate_kind(kind, value, &child_path(prefix, name), lookup);

            (name.to_string(), node)
        })
        .collect();

    FieldSetErrors {
        non_field_errors: lookup(&child_path(prefix, NON_FIELD_ERRORS)),
        fields,
    }
}

fn hydrate_kind(
    kind: &FieldKind,
    value: &Value,
    path: &str,
    lookup: &dyn Fn(&str) -> ErrorList,
) -> ErrorNode {
    match kind {
        FieldKind::Scalar(_) => ErrorNode::Field(lookup(path)),
        FieldKind::Object(set) => ErrorNode::Object(hydrate_set(set, value, path, lookup)),
        FieldKind::Array(array) => ErrorNode::Array(hydrate_array(array, value, path, lookup)),
    }
}

fn hydrate_array(
    array: &ArrayField,
    value: &Value,
    path: &str,
    lookup: &dyn Fn(&str) -> ErrorList,
) -> ArrayErrors {
    let items = value
        .as_list()
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    hydrate_kind(array.base(), item, &child_path(path, &index.to_string()), lookup)
                })
                .collect()
        })
        .unwrap_or_default();

    ArrayErrors {
        non_field_errors: lookup(&child_path(path, NON_FIELD_ERRORS)),
        items,
    }
}

///
/// TESTS
///

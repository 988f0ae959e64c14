use crate::{
    errors::{ErrorList, FlattenedErrors, NON_FIELD_ERRORS},
    field::{ArrayField, FieldKind, FieldSet},
};
use log::debug;
use serde_json::Value as JsonValue;

/// Flatten a server error payload shaped like `field_set` into dotted paths.
///
/// Array fields accept a list of messages (array-wide), a list of per-element
/// payloads, or an object keyed by element index. Keys the field set does not
/// declare are reported in the enclosing `non_field_errors` as
/// `"<key>: <message>"`.
#[must_use]
pub fn flatten_remote_errors(field_set: &FieldSet, payload: &JsonValue) -> FlattenedErrors {
    let mut out = FlattenedErrors::new();
    flatten_set(field_set, payload, "", &mut out);

    out
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn push(out: &mut FlattenedErrors, path: String, errors: ErrorList) {
    if !errors.is_empty() {
        out.append(path, errors);
    }
}

fn push_unknown(out: &mut FlattenedErrors, prefix: &str, key: &str, value: &JsonValue) {
    debug!("remote errors: '{key}' is not declared at '{prefix}'; reporting as non-field error");

    let errors = messages(value)
        .into_iter()
        .map(|msg| format!("{key}: {msg}"))
        .collect();
    push(out, join(prefix, NON_FIELD_ERRORS), errors);
}

fn flatten_set(set: &FieldSet, payload: &JsonValue, prefix: &str, out: &mut FlattenedErrors) {
    let JsonValue::Object(object) = payload else {
        push(out, join(prefix, NON_FIELD_ERRORS), messages(payload));
        return;
    };

    for (key, value) in object {
        if key == NON_FIELD_ERRORS {
            push(out, join(prefix, NON_FIELD_ERRORS), messages(value));
            continue;
        }

        match set.get(key) {
            Some(kind) => flatten_kind(kind, value, &join(prefix, key), out),
            None => push_unknown(out, prefix, key, value),
        }
    }
}

fn flatten_kind(kind: &FieldKind, value: &JsonValue, path: &str, out: &mut FlattenedErrors) {
    match kind {
        FieldKind::Scalar(_) => push(out, path.to_string(), messages(value)),
        FieldKind::Object(set) => flatten_set(set, value, path, out),
        FieldKind::Array(array) => flatten_array(array, value, path, out),
    }
}

fn flatten_array(array: &ArrayField, value: &JsonValue, path: &str, out: &mut FlattenedErrors) {
    match value {
        JsonValue::Array(items) if items.iter().all(JsonValue::is_string) => {
            push(out, join(path, NON_FIELD_ERRORS), messages(value));
        }
        JsonValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_kind(array.base(), item, &join(path, &index.to_string()), out);
            }
        }
        JsonValue::Object(object) => {
            for (key, item) in object {
                if key == NON_FIELD_ERRORS {
                    push(out, join(path, NON_FIELD_ERRORS), messages(item));
                } else if key.parse::<usize>().is_ok() {
                    flatten_kind(array.base(), item, &join(path, key), out);
                } else {
                    push_unknown(out, path, key, item);
                }
            }
        }
        other => push(out, join(path, NON_FIELD_ERRORS), messages(other)),
    }
}

// Leaf messages: strings verbatim, lists flattened, anything else as JSON.
fn messages(value: &JsonValue) -> ErrorList {
    match value {
        JsonValue::Null => Vec::new(),
        JsonValue::String(s) => vec![s.clone()],
        JsonValue::Array(items) => items.iter().flat_map(messages).collect(),
        other => vec![other.to_string()],
    }
}

///
/// TESTS
///

use crate::{
    errors::{FlattenedErrors, NON_FIELD_ERRORS},
    field::{FieldKind, config::ArrayFieldConfig},
    validator::{ValidatorRef, run_validators},
    value::Value,
};
use log::warn;
use serde_json::Value as JsonValue;

///
/// ArrayField
///
/// Homogeneous sequence of a base field or field set.
///

#[derive(Clone, Debug)]
pub struct ArrayField {
    base: Box<FieldKind>,
    config: ArrayFieldConfig,
}

impl ArrayField {
    pub fn new(base: impl Into<FieldKind>, config: ArrayFieldConfig) -> Self {
        Self {
            base: Box::new(base.into()),
            config,
        }
    }

    #[must_use]
    pub fn base(&self) -> &FieldKind {
        &self.base
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.config.label
    }

    #[must_use]
    pub const fn initial_length(&self) -> usize {
        self.config.initial_length
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.config.nullable
    }

    #[must_use]
    pub fn validators(&self) -> &[ValidatorRef] {
        &self.config.validators
    }

    /// `initial_length` independent base defaults, unless overridden.
    #[must_use]
    pub fn get_default(&self) -> Value {
        match &self.config.default {
            Some(default) => default.resolve(),
            None => Value::List(
                (0..self.config.initial_length)
                    .map(|_| self.base.get_default())
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn to_native(&self, raw: &JsonValue) -> Value {
        match raw {
            JsonValue::Null if self.config.nullable => Value::Null,
            JsonValue::Array(items) => {
                Value::List(items.iter().map(|item| self.base.to_native(item)).collect())
            }
            other => {
                warn!(
                    "array field '{}': expected a list, got {other}; using []",
                    self.config.label
                );
                Value::List(Vec::new())
            }
        }
    }

    #[must_use]
    pub fn from_native(&self, value: &Value) -> JsonValue {
        match value {
            Value::Null => JsonValue::Null,
            Value::List(items) => {
                JsonValue::Array(items.iter().map(|item| self.base.from_native(item)).collect())
            }
            other => {
                warn!(
                    "array field '{}': holds a {} value; sending []",
                    self.config.label,
                    other.kind_name()
                );
                JsonValue::Array(Vec::new())
            }
        }
    }

    /// Validate the whole sequence, then every element against the base.
    ///
    /// `non_field_errors` always exists; element errors are keyed by index
    /// (nested paths for object and array bases).
    #[must_use]
    pub fn validate_array(&self, value: &Value) -> FlattenedErrors {
        let mut errors = FlattenedErrors::new();
        errors.set(
            NON_FIELD_ERRORS,
            run_validators(&self.config.validators, value),
        );

        if self.config.nullable && value.is_null() {
            return errors;
        }

        let Some(items) = value.as_list() else {
            return errors;
        };

        for (index, item) in items.iter().enumerate() {
            self.base
                .validate(item)
                .merge_into(&index.to_string(), &mut errors);
        }

        errors
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::{FieldConfig, FieldSetRaw, char_field, number_field},
        validator::validator_fn,
    };
    use serde_json::json;

    fn not_blank() -> ValidatorRef {
        validator_fn(|v: &Value| (v.as_str() == Some("")).then_some("blank"))
    }

    fn list(msgs: &[&str]) -> Vec<String> {
        msgs.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn default_has_initial_length_independent_elements() {
        let raw = FieldSetRaw::new().with("tags", ArrayField::new(char_field(FieldConfig::new()), ArrayFieldConfig::new()));
        let array = ArrayField::new(raw, ArrayFieldConfig::new().initial_length(2));

        let mut first = array.get_default();
        let second = array.get_default();

        assert_eq!(first.as_list().map(Vec::len), Some(2));
        first.as_list_mut().unwrap()[0]
            .get_mut("tags")
            .and_then(Value::as_list_mut)
            .unwrap()
            .push(Value::from("x"));

        assert_eq!(second.as_list().unwrap()[0].get("tags"), Some(&Value::List(vec![])));
        assert_ne!(first, second);
    }

    #[test]
    fn element_errors_are_keyed_by_index() {
        let array = ArrayField::new(
            char_field(FieldConfig::new().validator_ref(not_blank())),
            ArrayFieldConfig::new(),
        );

        let errors = array.validate_array(&Value::list(["", "ok", ""]));

        assert_eq!(errors.len(), 4);
        assert!(errors.get_list(NON_FIELD_ERRORS).is_empty());
        assert_eq!(errors.get_list("0"), ["blank"]);
        assert!(errors.contains_key("1"));
        assert!(errors.get_list("1").is_empty());
        assert_eq!(errors.get_list("2"), ["blank"]);
    }

    #[test]
    fn whole_array_validators_land_in_non_field_errors() {
        let array = ArrayField::new(
            number_field(FieldConfig::new()),
            ArrayFieldConfig::new().validator_ref(validator_fn(|v: &Value| {
                v.as_list()
                    .is_some_and(Vec::is_empty)
                    .then_some("must not be empty")
            })),
        );

        let errors = array.validate_array(&Value::List(vec![]));

        assert_eq!(errors.get_list(NON_FIELD_ERRORS), ["must not be empty"]);
    }

    #[test]
    fn nested_object_errors_are_prefixed() {
        let raw = FieldSetRaw::new().with("url", char_field(FieldConfig::new().validator_ref(not_blank())));
        let array = ArrayField::new(raw, ArrayFieldConfig::new());

        let errors = array.validate_array(&Value::list([
            Value::map([("url", "a")]),
            Value::map([("url", "")]),
        ]));

        assert_eq!(errors.get_list("1.url"), list(&["blank"]));
        assert!(errors.contains_key("0.non_field_errors"));
        assert!(errors.get_list("0.url").is_empty());
    }

    #[test]
    fn arrays_of_arrays_nest_paths() {
        let inner = ArrayField::new(
            char_field(FieldConfig::new().validator_ref(not_blank())),
            ArrayFieldConfig::new(),
        );
        let outer = ArrayField::new(inner, ArrayFieldConfig::new());

        let errors = outer.validate_array(&Value::list([Value::list(["a", ""])]));

        assert_eq!(errors.get_list("0.1"), ["blank"]);
        assert!(errors.contains_key("0.non_field_errors"));
    }

    #[test]
    fn non_list_wire_input_becomes_empty() {
        let array = ArrayField::new(number_field(FieldConfig::new()), ArrayFieldConfig::new());

        assert_eq!(array.to_native(&json!({"a": 1})), Value::List(vec![]));
        assert_eq!(
            array.to_native(&json!(["1 000", 2])),
            Value::list([1000.0, 2.0])
        );
        assert_eq!(array.from_native(&Value::list([3.0])), json!([3]));
    }

    #[test]
    fn nullable_array_still_defaults_to_initial_length() {
        let array = ArrayField::new(
            number_field(FieldConfig::new()),
            ArrayFieldConfig::new().initial_length(3).nullable(true),
        );

        assert_eq!(array.get_default(), Value::list([0.0, 0.0, 0.0]));
        assert_eq!(array.to_native(&JsonValue::Null), Value::Null);

        let errors = array.validate_array(&Value::Null);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn factory_override_replaces_initial_length() {
        let array = ArrayField::new(
            number_field(FieldConfig::new()),
            ArrayFieldConfig::new()
                .initial_length(5)
                .default_with(|| Value::list([Value::list([1.0])])),
        );

        let mut first = array.get_default();
        let second = array.get_default();
        first.as_list_mut().unwrap()[0]
            .as_list_mut()
            .unwrap()
            .push(Value::from(2));

        assert_eq!(second, Value::list([Value::list([1.0])]));
        assert_ne!(first, second);
        assert_eq!(array.get_default(), second);
    }
}

use crate::{
    error::DefinitionError,
    errors::{FlattenedErrors, NON_FIELD_ERRORS},
    field::{FieldKind, FieldSetRaw, RawEntry, config::FieldSetConfig},
    validator::{ValidatorRef, run_validators},
    value::Value,
};
use log::warn;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::BTreeMap;

///
/// FieldSet
///
/// Named, ordered collection of field kinds.
/// Every entry is normalized at construction; raw nested sets become child
/// `FieldSet`s, so walkers only ever see the three field kinds.
///

#[derive(Clone, Debug, Default)]
pub struct FieldSet {
    root: Vec<(String, FieldKind)>,
    config: FieldSetConfig,
}

impl FieldSet {
    #[must_use]
    pub fn new(raw: FieldSetRaw) -> Self {
        Self::with_config(raw, FieldSetConfig::new())
    }

    #[must_use]
    pub fn with_config(raw: FieldSetRaw, config: FieldSetConfig) -> Self {
        let root = raw
            .into_entries()
            .into_iter()
            .map(|(name, entry)| {
                let kind = match entry {
                    RawEntry::Field(kind) => kind,
                    RawEntry::Nested(nested) => FieldKind::Object(Self::new(nested)),
                };
                (name, kind)
            })
            .collect();

        Self { root, config }
    }

    /// Like [`FieldSet::with_config`], but rejects names that cannot be
    /// addressed by dotted paths.
    pub fn try_with_config(raw: FieldSetRaw, config: FieldSetConfig) -> Result<Self, DefinitionError> {
        raw.check_names()?;

        Ok(Self::with_config(raw, config))
    }

    pub fn try_new(raw: FieldSetRaw) -> Result<Self, DefinitionError> {
        Self::try_with_config(raw, FieldSetConfig::new())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldKind> {
        self.root
            .iter()
            .find_map(|(key, kind)| (key == name).then_some(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldKind)> {
        self.root.iter().map(|(name, kind)| (name.as_str(), kind))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.root.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.root.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.config.label
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.config.nullable
    }

    #[must_use]
    pub fn validators(&self) -> &[ValidatorRef] {
        &self.config.validators
    }

    /// Map of every entry's default, unless overridden.
    #[must_use]
    pub fn get_default(&self) -> Value {
        match &self.config.default {
            Some(default) => default.resolve(),
            None => Value::Map(
                self.root
                    .iter()
                    .map(|(name, kind)| (name.clone(), kind.get_default()))
                    .collect(),
            ),
        }
    }

    /// Wire → native. Missing keys take the entry default; unknown keys are
    /// dropped.
    #[must_use]
    pub fn to_native(&self, raw: &JsonValue) -> Value {
        match raw {
            JsonValue::Null if self.config.nullable => Value::Null,
            JsonValue::Object(object) => {
                let map: BTreeMap<String, Value> = self
                    .root
                    .iter()
                    .map(|(name, kind)| {
                        let value = object
                            .get(name)
                            .map_or_else(|| kind.get_default(), |raw| kind.to_native(raw));
                        (name.clone(), value)
                    })
                    .collect();

                Value::Map(map)
            }
            other => {
                warn!(
                    "field set '{}': expected an object, got {other}; using the default",
                    self.config.label
                );
                self.get_default()
            }
        }
    }

    /// Native → wire. Only declared entries present in `value` are emitted.
    #[must_use]
    pub fn from_native(&self, value: &Value) -> JsonValue {
        match value {
            Value::Null => JsonValue::Null,
            Value::Map(map) => {
                let object: JsonMap<String, JsonValue> = self
                    .root
                    .iter()
                    .filter_map(|(name, kind)| {
                        map.get(name)
                            .map(|value| (name.clone(), kind.from_native(value)))
                    })
                    .collect();

                JsonValue::Object(object)
            }
            other => {
                warn!(
                    "field set '{}': holds a {} value; sending null",
                    self.config.label,
                    other.kind_name()
                );
                JsonValue::Null
            }
        }
    }

    /// Validate `data` against every entry.
    ///
    /// Scalar entries land under their name, nested sets and arrays are
    /// re-keyed under `"<name>.<child>"`. Array entries are only walked when
    /// their data is a list.
    #[must_use]
    pub fn validate_field_set(&self, data: &Value) -> FlattenedErrors {
        let mut errors = FlattenedErrors::new();
        errors.set(NON_FIELD_ERRORS, run_validators(&self.config.validators, data));

        if self.config.nullable && data.is_null() {
            return errors;
        }

        for (name, kind) in &self.root {
            let value = data.get(name).unwrap_or(&Value::Null);

            match kind {
                FieldKind::Array(array) => {
                    if value.as_list().is_some() {
                        errors.extend_prefixed(name, array.validate_array(value));
                    }
                }
                other => other.validate(value).merge_into(name, &mut errors),
            }
        }

        errors
    }
}

impl From<FieldSetRaw> for FieldSet {
    fn from(raw: FieldSetRaw) -> Self {
        Self::new(raw)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::{ArrayField, ArrayFieldConfig, FieldConfig, boolean_field, char_field, number_field},
        test_support::{capture_logs, count_level},
        validator::validator_fn,
    };
    use log::Level;
    use serde_json::json;

    fn not_blank() -> ValidatorRef {
        validator_fn(|v: &Value| (v.as_str() == Some("")).then_some("blank"))
    }

    fn person() -> FieldSet {
        FieldSet::new(
            FieldSetRaw::new()
                .with("id", number_field(FieldConfig::new().default_value(42)))
                .with(
                    "name",
                    char_field(FieldConfig::new().default_value("foo").validator_ref(not_blank())),
                )
                .nested(
                    "address",
                    FieldSetRaw::new()
                        .with("city", char_field(FieldConfig::new().validator_ref(not_blank())))
                        .with("primary", boolean_field(FieldConfig::new())),
                ),
        )
    }

    #[test]
    fn raw_nested_entries_are_normalized() {
        let set = person();

        assert!(matches!(set.get("address"), Some(FieldKind::Object(_))));
        assert_eq!(set.names().collect::<Vec<_>>(), ["id", "name", "address"]);
    }

    #[test]
    fn default_nests_entry_defaults() {
        let set = FieldSet::new(
            FieldSetRaw::new()
                .with("id", number_field(FieldConfig::new().default_value(42)))
                .with("name", char_field(FieldConfig::new().default_value("x"))),
        );

        assert_eq!(
            set.get_default(),
            Value::map([("id", Value::from(42)), ("name", Value::from("x"))])
        );
    }

    #[test]
    fn nullable_override_collapses_to_null() {
        let set = FieldSet::with_config(
            FieldSetRaw::new().with("id", number_field(FieldConfig::new())),
            FieldSetConfig::new().nullable(true).default_value(Value::Null),
        );

        assert_eq!(set.get_default(), Value::Null);
    }

    #[test]
    fn nullable_set_without_override_builds_entry_defaults() {
        let set = FieldSet::with_config(
            FieldSetRaw::new().with("id", number_field(FieldConfig::new().default_value(1))),
            FieldSetConfig::new().nullable(true),
        );

        assert_eq!(set.get_default(), Value::map([("id", 1)]));
        assert_eq!(set.to_native(&JsonValue::Null), Value::Null);
    }

    #[test]
    fn factory_override_is_fresh_per_call() {
        let set = FieldSet::with_config(
            FieldSetRaw::new().with("id", number_field(FieldConfig::new())),
            FieldSetConfig::new().default_with(|| Value::map([("id", Value::list([7]))])),
        );

        let mut first = set.get_default();
        first
            .get_mut("id")
            .and_then(Value::as_list_mut)
            .unwrap()
            .push(Value::from(8));

        assert_eq!(set.get_default(), Value::map([("id", Value::list([7]))]));
    }

    #[test]
    fn non_object_wire_input_takes_the_configured_default() {
        let set = FieldSet::with_config(
            FieldSetRaw::new().with("id", number_field(FieldConfig::new())),
            FieldSetConfig::new().default_with(|| Value::map([("id", 7)])),
        );

        let (native, logs) = capture_logs(|| set.to_native(&json!("garbage")));

        assert_eq!(native, Value::map([("id", 7)]));
        assert_eq!(count_level(&logs, Level::Warn), 1);
    }

    #[test]
    fn validation_prefixes_nested_paths() {
        let set = person();
        let mut data = set.get_default();
        *data.get_mut("name").unwrap() = Value::from("");

        let errors = set.validate_field_set(&data);

        assert_eq!(errors.get_list("name"), ["blank"]);
        assert_eq!(errors.get_list("address.city"), ["blank"]);
        assert!(errors.contains_key("address.non_field_errors"));
        assert!(errors.contains_key(NON_FIELD_ERRORS));
        assert!(errors.get_list("id").is_empty());
    }

    #[test]
    fn array_entries_skip_non_list_data() {
        let set = FieldSet::new(FieldSetRaw::new().with(
            "tags",
            ArrayField::new(char_field(FieldConfig::new()), ArrayFieldConfig::new()),
        ));

        let skipped = set.validate_field_set(&Value::map([("tags", Value::Null)]));
        assert!(!skipped.contains_key("tags.non_field_errors"));

        let walked = set.validate_field_set(&Value::map([("tags", Value::list(["a"]))]));
        assert!(walked.contains_key("tags.non_field_errors"));
        assert!(walked.contains_key("tags.0"));
    }

    #[test]
    fn nullable_set_with_null_data_only_reports_itself() {
        let set = FieldSet::with_config(
            FieldSetRaw::new().with("x", char_field(FieldConfig::new().validator_ref(not_blank()))),
            FieldSetConfig::new().nullable(true),
        );

        let errors = set.validate_field_set(&Value::Null);

        assert_eq!(errors.keys().collect::<Vec<_>>(), [NON_FIELD_ERRORS]);
    }

    #[test]
    fn wire_conversion_fills_missing_and_drops_unknown() {
        let set = person();

        let native = set.to_native(&json!({"id": "1 200", "extra": true}));

        assert_eq!(native.get("id"), Some(&Value::Number(1200.0)));
        assert_eq!(native.get("name"), Some(&Value::from("foo")));
        assert!(native.get("extra").is_none());
        assert_eq!(
            set.from_native(&native),
            json!({"id": 1200, "name": "foo", "address": {"city": "", "primary": false}})
        );
    }

    #[test]
    fn non_object_wire_input_warns() {
        let set = person();

        let (native, logs) = capture_logs(|| set.to_native(&json!([1, 2])));

        assert_eq!(native, set.get_default());
        assert_eq!(count_level(&logs, Level::Warn), 1);
    }

    #[test]
    fn try_new_rejects_unaddressable_names() {
        let reserved = FieldSetRaw::new().with(NON_FIELD_ERRORS, char_field(FieldConfig::new()));
        let dotted = FieldSetRaw::new().with("a.b", char_field(FieldConfig::new()));
        let nested_index = FieldSetRaw::new().nested(
            "inner",
            FieldSetRaw::new().with("0", char_field(FieldConfig::new())),
        );

        assert!(matches!(
            FieldSet::try_new(reserved),
            Err(DefinitionError::ReservedName { .. })
        ));
        assert!(matches!(
            FieldSet::try_new(dotted),
            Err(DefinitionError::InvalidName { .. })
        ));
        let err = FieldSet::try_new(nested_index).unwrap_err();
        assert!(matches!(&err, DefinitionError::Context { path, .. } if path == "inner"));
        assert!(matches!(err.leaf(), DefinitionError::InvalidName { name } if name == "0"));
    }
}

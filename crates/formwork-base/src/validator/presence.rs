use crate::validator::message_validator;
use formwork_core::{
    validator::{Validator, ValidatorOutcome},
    value::Value,
};

message_validator!(
    ///
    /// NotNull
    ///
    NotNull,
    "This value may not be null."
);

impl Validator for NotNull {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        if value.is_null() {
            ValidatorOutcome::Error(self.message())
        } else {
            ValidatorOutcome::Pass
        }
    }
}

message_validator!(
    ///
    /// NotBlank
    /// Rejects the empty string; other values pass.
    ///
    NotBlank,
    "This field may not be blank."
);

impl Validator for NotBlank {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        match value {
            Value::Text(s) if s.is_empty() => ValidatorOutcome::Error(self.message()),
            _ => ValidatorOutcome::Pass,
        }
    }
}

message_validator!(
    ///
    /// NotEmpty
    /// Rejects empty lists, maps and strings; null passes.
    ///
    NotEmpty,
    "This list may not be empty."
);

impl Validator for NotEmpty {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        let empty = match value {
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Text(s) => s.is_empty(),
            _ => false,
        };

        if empty {
            ValidatorOutcome::Error(self.message())
        } else {
            ValidatorOutcome::Pass
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_null_only_rejects_null() {
        assert!(!NotNull::new().validate(&Value::Null).is_pass());
        assert!(NotNull::new().validate(&Value::from("")).is_pass());
        assert!(NotNull::new().validate(&Value::Bool(false)).is_pass());
    }

    #[test]
    fn not_blank_rejects_empty_text() {
        assert_eq!(
            NotBlank::new().validate(&Value::from("")),
            ValidatorOutcome::Error(NotBlank::DEFAULT_MESSAGE.to_string())
        );
        assert!(NotBlank::new().validate(&Value::from(" ")).is_pass());
        assert!(NotBlank::new().validate(&Value::Null).is_pass());
    }

    #[test]
    fn custom_message_replaces_default() {
        let v = NotBlank::new().with_message("name required");

        assert_eq!(
            v.validate(&Value::from("")),
            ValidatorOutcome::Error("name required".to_string())
        );
    }

    #[test]
    fn not_empty_judges_containers() {
        let v = NotEmpty::new();

        assert!(!v.validate(&Value::List(vec![])).is_pass());
        assert!(!v.validate(&Value::from("")).is_pass());
        assert!(v.validate(&Value::list([1])).is_pass());
        assert!(v.validate(&Value::Null).is_pass());
    }
}

use crate::validator::message_validator;
use formwork_core::{
    validator::{Validator, ValidatorOutcome},
    value::Value,
};

/// Truthiness of a native value; containers and dates are always truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Text(s) => !s.is_empty(),
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Date(_) | Value::DateTime(_) | Value::List(_) | Value::Map(_) => true,
    }
}

message_validator!(
    ///
    /// IsTrue
    ///
    IsTrue,
    "This value must be true."
);

impl Validator for IsTrue {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        if is_truthy(value) {
            ValidatorOutcome::Pass
        } else {
            ValidatorOutcome::Error(self.message())
        }
    }
}

message_validator!(
    ///
    /// IsFalse
    ///
    IsFalse,
    "This value must be false."
);

impl Validator for IsFalse {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        if is_truthy(value) {
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
    fn truthiness_follows_value_shape() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&Value::Number(0.0)));
        assert!(!is_truthy(&Value::Number(f64::NAN)));
        assert!(!is_truthy(&Value::from("")));
        assert!(is_truthy(&Value::List(vec![])));
        assert!(is_truthy(&Value::from("no")));
    }

    #[test]
    fn is_true_and_is_false_are_complements() {
        for value in [Value::Bool(true), Value::Bool(false), Value::Null, Value::from(1)] {
            assert_ne!(
                IsTrue::new().validate(&value).is_pass(),
                IsFalse::new().validate(&value).is_pass()
            );
        }
    }
}

use crate::{errors::ErrorList, value::Value};
use std::{fmt, sync::Arc};

///
/// ValidatorOutcome
///
/// What a single validator reports for a value.
/// `Pass` is the "no complaint" case; messages are never raised, only returned.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ValidatorOutcome {
    #[default]
    Pass,
    Error(String),
    Errors(Vec<String>),
}

impl ValidatorOutcome {
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Append the carried messages to `errors`, preserving order.
    pub fn append_to(self, errors: &mut ErrorList) {
        match self {
            Self::Pass => {}
            Self::Error(msg) => errors.push(msg),
            Self::Errors(msgs) => errors.extend(msgs),
        }
    }
}

impl From<()> for ValidatorOutcome {
    fn from((): ()) -> Self {
        Self::Pass
    }
}

impl From<&str> for ValidatorOutcome {
    fn from(msg: &str) -> Self {
        Self::Error(msg.to_string())
    }
}

impl From<String> for ValidatorOutcome {
    fn from(msg: String) -> Self {
        Self::Error(msg)
    }
}

impl From<Vec<String>> for ValidatorOutcome {
    fn from(msgs: Vec<String>) -> Self {
        Self::Errors(msgs)
    }
}

impl From<Option<String>> for ValidatorOutcome {
    fn from(opt: Option<String>) -> Self {
        opt.map_or(Self::Pass, Self::Error)
    }
}

impl From<Option<&str>> for ValidatorOutcome {
    fn from(opt: Option<&str>) -> Self {
        opt.map_or(Self::Pass, Self::from)
    }
}

impl From<Option<Vec<String>>> for ValidatorOutcome {
    fn from(opt: Option<Vec<String>>) -> Self {
        opt.map_or(Self::Pass, Self::Errors)
    }
}

///
/// Validator
///
/// A pure check over a native value.
/// Validators also run against `Value::Null` for nullable fields and may
/// reject it explicitly.
///

pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value) -> ValidatorOutcome;
}

/// Shared validator handle stored on field definitions.
pub type ValidatorRef = Arc<dyn Validator>;

///
/// FnValidator
/// Adapts a closure into a `Validator`.
///

pub struct FnValidator<F>(F);

impl<F, R> Validator for FnValidator<F>
where
    F: Fn(&Value) -> R + Send + Sync,
    R: Into<ValidatorOutcome>,
{
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        (self.0)(value).into()
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnValidator")
    }
}

/// Wrap a closure as a shareable validator.
pub fn validator_fn<F, R>(f: F) -> ValidatorRef
where
    F: Fn(&Value) -> R + Send + Sync + 'static,
    R: Into<ValidatorOutcome> + 'static,
{
    Arc::new(FnValidator(f))
}

/// Run every validator against `value`, concatenating messages in
/// registration order.
#[must_use]
pub fn run_validators(validators: &[ValidatorRef], value: &Value) -> ErrorList {
    let mut errors = ErrorList::new();
    for validator in validators {
        validator.validate(value).append_to(&mut errors);
    }

    errors
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_concatenate_in_registration_order() {
        let validators = vec![
            validator_fn(|_| "first"),
            validator_fn(|_| ()),
            validator_fn(|_| vec!["second".to_string(), "third".to_string()]),
            validator_fn(|_| None::<String>),
        ];

        let errors = run_validators(&validators, &Value::Null);

        assert_eq!(errors, vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_then_passing_yields_single_message() {
        let validators = vec![
            validator_fn(|v: &Value| {
                if v.as_str() == Some("") {
                    Some("blank")
                } else {
                    None
                }
            }),
            validator_fn(|_| None::<String>),
        ];

        assert_eq!(run_validators(&validators, &Value::from("")), vec!["blank"]);
        assert!(run_validators(&validators, &Value::from("x")).is_empty());
    }
}

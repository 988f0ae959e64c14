use crate::validator::message_validator;
use formwork_core::{
    validator::{Validator, ValidatorOutcome},
    value::Value,
};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL
        .get_or_init(|| {
            Regex::new(
                r"^[a-zA-Z0-9]+([_\-.][a-zA-Z0-9]+)*@[a-zA-Z0-9]+(-[a-zA-Z0-9])*(\.[a-zA-Z0-9]+(-[a-zA-Z0-9])*)*\.[a-zA-Z]{2,}$",
            )
            .ok()
        })
        .as_ref()
}

message_validator!(
    ///
    /// IsEmail
    /// Empty text passes; pair with `NotBlank` to require a value.
    ///
    IsEmail,
    "Enter a valid email address."
);

impl Validator for IsEmail {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        let Value::Text(s) = value else {
            return ValidatorOutcome::Pass;
        };

        if s.is_empty() || email_regex().is_some_and(|re| re.is_match(s)) {
            ValidatorOutcome::Pass
        } else {
            ValidatorOutcome::Error(self.message())
        }
    }
}

///
/// TESTS
///

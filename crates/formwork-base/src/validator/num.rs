use formwork_core::{
    validator::{Validator, ValidatorOutcome},
    value::Value,
};

///
/// GreaterThan
/// Numbers must be strictly greater than `min`; non-numbers pass.
///

#[derive(Clone, Debug, PartialEq)]
pub struct GreaterThan {
    min: f64,
    message: Option<String>,
}

impl GreaterThan {
    #[must_use]
    pub const fn new(min: f64) -> Self {
        Self { min, message: None }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for GreaterThan {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        match value.as_f64() {
            Some(n) if !n.is_nan() && n <= self.min => ValidatorOutcome::Error(
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("The value must be greater than {}.", self.min)),
            ),
            _ => ValidatorOutcome::Pass,
        }
    }
}

///
/// LessThan
/// Numbers must be strictly less than `max`; non-numbers pass.
///

#[derive(Clone, Debug, PartialEq)]
pub struct LessThan {
    max: f64,
    message: Option<String>,
}

impl LessThan {
    #[must_use]
    pub const fn new(max: f64) -> Self {
        Self { max, message: None }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for LessThan {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        match value.as_f64() {
            Some(n) if !n.is_nan() && n >= self.max => ValidatorOutcome::Error(
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("The value must be less than {}.", self.max)),
            ),
            _ => ValidatorOutcome::Pass,
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
    fn bounds_are_strict() {
        let gt = GreaterThan::new(10.0);
        assert!(gt.validate(&Value::from(11)).is_pass());
        assert_eq!(
            gt.validate(&Value::from(10)),
            ValidatorOutcome::Error("The value must be greater than 10.".to_string())
        );

        let lt = LessThan::new(0.5);
        assert!(lt.validate(&Value::Number(0.25)).is_pass());
        assert!(!lt.validate(&Value::Number(0.5)).is_pass());
    }

    #[test]
    fn other_types_and_nan_pass() {
        let gt = GreaterThan::new(10.0).with_message("too small");

        assert!(gt.validate(&Value::from("3")).is_pass());
        assert!(gt.validate(&Value::Null).is_pass());
        assert!(gt.validate(&Value::Number(f64::NAN)).is_pass());
        assert_eq!(
            gt.validate(&Value::from(1)),
            ValidatorOutcome::Error("too small".to_string())
        );
    }
}

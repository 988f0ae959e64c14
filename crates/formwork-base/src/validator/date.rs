use formwork_core::{
    field::convert::format_datetime,
    validator::{Validator, ValidatorOutcome},
    value::Value,
};
use time::OffsetDateTime;

// Dates compare as UTC midnight; other values are not judged.
fn instant(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Date(d) => Some(d.midnight().assume_utc()),
        _ => None,
    }
}

fn render(bound: OffsetDateTime) -> String {
    format_datetime(bound).unwrap_or_else(|| bound.to_string())
}

///
/// LaterThan
/// Dates must fall strictly after `earliest`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct LaterThan {
    earliest: OffsetDateTime,
    message: Option<String>,
}

impl LaterThan {
    #[must_use]
    pub const fn new(earliest: OffsetDateTime) -> Self {
        Self {
            earliest,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for LaterThan {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        match instant(value) {
            Some(at) if at <= self.earliest => ValidatorOutcome::Error(
                self.message.clone().unwrap_or_else(|| {
                    format!("The date must be later than {}.", render(self.earliest))
                }),
            ),
            _ => ValidatorOutcome::Pass,
        }
    }
}

///
/// SoonerThan
/// Dates must fall strictly before `latest`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SoonerThan {
    latest: OffsetDateTime,
    message: Option<String>,
}

impl SoonerThan {
    #[must_use]
    pub const fn new(latest: OffsetDateTime) -> Self {
        Self {
            latest,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for SoonerThan {
    fn validate(&self, value: &Value) -> ValidatorOutcome {
        match instant(value) {
            Some(at) if at >= self.latest => ValidatorOutcome::Error(
                self.message.clone().unwrap_or_else(|| {
                    format!("The date must be earlier than {}.", render(self.latest))
                }),
            ),
            _ => ValidatorOutcome::Pass,
        }
    }
}

///
/// TESTS
///

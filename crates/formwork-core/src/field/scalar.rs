use crate::{
    errors::ErrorList,
    field::{
        config::FieldConfig,
        convert::{
            epoch, format_date, format_datetime, looks_numeric, number_to_wire, parse_date,
            parse_datetime, parse_number, plain_json, render_text, wire_truthy,
        },
    },
    validator::{ValidatorRef, run_validators},
    value::Value,
};
use log::warn;
use serde_json::Value as JsonValue;
use std::fmt::{self, Display};
use time::{OffsetDateTime, UtcOffset};

///
/// ScalarKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarKind {
    Boolean,
    Char,
    Number,
    Date,
    DateTime,
}

impl ScalarKind {
    /// Zero value used when no default is configured.
    /// Date kinds read the clock on every call.
    #[must_use]
    pub fn zero(self) -> Value {
        match self {
            Self::Boolean => Value::Bool(false),
            Self::Char => Value::Text(String::new()),
            Self::Number => Value::Number(0.0),
            Self::Date => Value::Date(OffsetDateTime::now_utc().date()),
            Self::DateTime => Value::DateTime(OffsetDateTime::now_utc()),
        }
    }
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::Number => "number",
            Self::Date => "date",
            Self::DateTime => "datetime",
        };

        f.write_str(name)
    }
}

///
/// Field
///
/// Atomic typed slot. Conversions are total: bad input is logged at `warn`
/// and replaced with the kind's fallback so the surrounding walk completes.
///

#[derive(Clone, Debug)]
pub struct Field {
    kind: ScalarKind,
    config: FieldConfig,
}

impl Field {
    #[must_use]
    pub const fn new(kind: ScalarKind, config: FieldConfig) -> Self {
        Self { kind, config }
    }

    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
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

    /// Configured default, else the kind's zero value. Nullability only
    /// governs what the field accepts, never what it starts with.
    #[must_use]
    pub fn get_default(&self) -> Value {
        match &self.config.default {
            Some(default) => default.resolve(),
            None => self.kind.zero(),
        }
    }

    /// Wire → native.
    #[must_use]
    pub fn to_native(&self, raw: &JsonValue) -> Value {
        if self.config.nullable && raw.is_null() {
            return Value::Null;
        }

        match self.kind {
            ScalarKind::Boolean => self.bool_to_native(raw),
            ScalarKind::Char => self.char_to_native(raw),
            ScalarKind::Number => self.number_to_native(raw),
            ScalarKind::Date => self.date_to_native(raw),
            ScalarKind::DateTime => self.datetime_to_native(raw),
        }
    }

    /// Native → wire.
    #[must_use]
    pub fn from_native(&self, value: &Value) -> JsonValue {
        if value.is_null() {
            return self.null_to_wire();
        }

        match (self.kind, value) {
            (ScalarKind::Boolean, Value::Bool(b)) => JsonValue::Bool(*b),
            (ScalarKind::Char, Value::Text(s)) => JsonValue::String(s.clone()),
            (ScalarKind::Number, Value::Number(n)) => number_to_wire(*n).unwrap_or_else(|| {
                warn!("{}: cannot send non-finite number {n}; sending null", self.describe());
                JsonValue::Null
            }),
            (ScalarKind::Date, Value::Date(d)) => format_date(*d).map_or(JsonValue::Null, JsonValue::String),
            (ScalarKind::Date, Value::DateTime(dt)) => {
                format_date(dt.to_offset(UtcOffset::UTC).date())
                    .map_or(JsonValue::Null, JsonValue::String)
            }
            (ScalarKind::DateTime, Value::DateTime(dt)) => {
                format_datetime(*dt).map_or(JsonValue::Null, JsonValue::String)
            }
            (ScalarKind::DateTime, Value::Date(d)) => {
                format_datetime(d.midnight().assume_utc())
                    .map_or(JsonValue::Null, JsonValue::String)
            }
            (_, other) => {
                warn!(
                    "{}: holds a {} value; sending it unchanged",
                    self.describe(),
                    other.kind_name()
                );
                plain_json(other)
            }
        }
    }

    /// Run the attached validators in registration order.
    #[must_use]
    pub fn validate(&self, value: &Value) -> ErrorList {
        run_validators(&self.config.validators, value)
    }

    // ------------------------------------------------------------------
    // wire → native per kind
    // ------------------------------------------------------------------

    fn bool_to_native(&self, raw: &JsonValue) -> Value {
        if let Some(b) = raw.as_bool() {
            return Value::Bool(b);
        }

        let truthy = wire_truthy(raw);
        warn!("{}: coercing {raw} to {truthy}", self.describe());

        Value::Bool(truthy)
    }

    fn char_to_native(&self, raw: &JsonValue) -> Value {
        if let Some(s) = raw.as_str() {
            return Value::Text(s.to_string());
        }

        let text = render_text(raw);
        if !raw.is_number() && !raw.is_boolean() {
            warn!("{}: rendering {raw} as text {text:?}", self.describe());
        }

        Value::Text(text)
    }

    fn number_to_native(&self, raw: &JsonValue) -> Value {
        let parsed = match raw {
            JsonValue::Number(n) => n.as_f64().filter(|n| n.is_finite()),
            JsonValue::String(s) => parse_number(s),
            _ => None,
        };

        parsed.map_or_else(
            || {
                warn!("{}: cannot read {raw} as a number; using 0", self.describe());
                Value::Number(0.0)
            },
            Value::Number,
        )
    }

    fn date_to_native(&self, raw: &JsonValue) -> Value {
        let parsed = raw
            .as_str()
            .filter(|s| !looks_numeric(s))
            .and_then(parse_date);

        parsed.map_or_else(
            || {
                warn!("{}: cannot read {raw} as a date; using 1970-01-01", self.describe());
                Value::Date(epoch().date())
            },
            Value::Date,
        )
    }

    fn datetime_to_native(&self, raw: &JsonValue) -> Value {
        let parsed = raw
            .as_str()
            .filter(|s| !looks_numeric(s))
            .and_then(parse_datetime);

        parsed.map_or_else(
            || {
                warn!(
                    "{}: cannot read {raw} as a datetime; using 1970-01-01T00:00:00Z",
                    self.describe()
                );
                Value::DateTime(epoch())
            },
            Value::DateTime,
        )
    }

    // Null for a field that does not accept it.
    fn null_to_wire(&self) -> JsonValue {
        if self.config.nullable {
            return JsonValue::Null;
        }

        match self.kind {
            ScalarKind::Char => {
                warn!("{}: null in a non-nullable field; sending \"\"", self.describe());
                JsonValue::String(String::new())
            }
            ScalarKind::Boolean => {
                warn!("{}: null in a non-nullable field; sending false", self.describe());
                JsonValue::Bool(false)
            }
            ScalarKind::Number => {
                warn!("{}: null in a non-nullable field; sending null", self.describe());
                JsonValue::Null
            }
            ScalarKind::Date | ScalarKind::DateTime => JsonValue::Null,
        }
    }

    fn describe(&self) -> String {
        if self.config.label.is_empty() {
            format!("{} field", self.kind)
        } else {
            format!("{} field '{}'", self.kind, self.config.label)
        }
    }
}

///
/// TESTS
///

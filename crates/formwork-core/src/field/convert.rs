//! Wire ⇄ native helpers shared by the scalar field kinds.
//!
//! Everything here is total: malformed input yields `None` (or a rendered
//! fallback) and the caller decides which zero value to substitute.

use crate::value::Value;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::{borrow::Cow, sync::OnceLock};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

static DIGIT_GROUPS: OnceLock<Option<Regex>> = OnceLock::new();

/// Largest integer that survives an f64 round trip exactly.
const F64_SAFE_INT: f64 = 9_007_199_254_740_992.0;

fn digit_groups() -> Option<&'static Regex> {
    DIGIT_GROUPS
        .get_or_init(|| Regex::new(r"(\d)\s+(\d)").ok())
        .as_ref()
}

/// Remove whitespace between digit groups (`"1 000"` → `"1000"`) and trim.
#[must_use]
pub fn collapse_digit_groups(raw: &str) -> Cow<'_, str> {
    let collapsed = match digit_groups() {
        Some(re) => re.replace_all(raw, "$1$2"),
        None => Cow::Borrowed(raw),
    };

    match collapsed {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    }
}

/// Parse a finite decimal number from text.
/// Empty input and non-finite results are rejected.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let collapsed = collapse_digit_groups(text);
    if collapsed.is_empty() {
        return None;
    }

    collapsed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric text (including blank text) is never treated as a date.
#[must_use]
pub fn looks_numeric(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.parse::<f64>().is_ok()
}

/// Wire number from a native one.
/// Integral values inside the exact-f64 range are emitted as JSON integers.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn number_to_wire(n: f64) -> Option<JsonValue> {
    if !n.is_finite() {
        return None;
    }

    if n.fract() == 0.0 && n.abs() <= F64_SAFE_INT {
        return Some(JsonValue::from(n as i64));
    }

    serde_json::Number::from_f64(n).map(JsonValue::Number)
}

/// Render arbitrary wire data as text.
/// Lists render as their comma-joined members wrapped in brackets.
#[must_use]
pub fn render_text(raw: &JsonValue) -> String {
    match raw {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => format!("[{}]", join_items(items)),
        other => render_scalar(other),
    }
}

fn render_scalar(raw: &JsonValue) -> String {
    match raw {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => join_items(items),
        JsonValue::Object(_) => raw.to_string(),
    }
}

fn join_items(items: &[JsonValue]) -> String {
    items
        .iter()
        .map(|item| match item {
            JsonValue::Null => String::new(),
            other => render_scalar(other),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Truthiness of arbitrary wire data.
#[must_use]
pub fn wire_truthy(raw: &JsonValue) -> bool {
    match raw {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(map) => !map.is_empty(),
    }
}

/// Structural wire form of a native value, used when a value does not match
/// the kind of the field converting it.
#[must_use]
pub fn plain_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Number(n) => number_to_wire(*n).unwrap_or(JsonValue::Null),
        Value::Date(d) => format_date(*d).map_or(JsonValue::Null, JsonValue::String),
        Value::DateTime(dt) => format_datetime(*dt).map_or(JsonValue::Null, JsonValue::String),
        Value::List(items) => JsonValue::Array(items.iter().map(plain_json).collect()),
        Value::Map(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), plain_json(v)))
                .collect(),
        ),
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Midnight UTC on 1970-01-01, the fallback for unparseable dates.
#[must_use]
pub const fn epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

/// Parse ISO-ish date/time text into a UTC instant.
///
/// Accepted, in order: RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM` (all read as UTC),
/// and a bare `YYYY-MM-DD` (UTC midnight).
#[must_use]
pub fn parse_datetime(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(dt) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(dt.to_offset(UtcOffset::UTC));
    }

    let naive = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];
    for fmt in naive {
        if let Ok(dt) = PrimitiveDateTime::parse(text, fmt) {
            return Some(dt.assume_utc());
        }
    }

    parse_date_only(text).map(|d| d.midnight().assume_utc())
}

/// Parse date text; full timestamps contribute their UTC calendar date.
#[must_use]
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();

    parse_date_only(text).or_else(|| parse_datetime(text).map(OffsetDateTime::date))
}

fn parse_date_only(text: &str) -> Option<Date> {
    Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
}

/// `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> Option<String> {
    date.format(format_description!("[year]-[month]-[day]")).ok()
}

/// UTC `YYYY-MM-DDTHH:MM:SS.mmmZ`; sub-millisecond precision is dropped.
#[must_use]
pub fn format_datetime(dt: OffsetDateTime) -> Option<String> {
    dt.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .ok()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::{date, datetime};

    #[test]
    fn digit_groups_collapse_like_thousand_separators() {
        assert_eq!(collapse_digit_groups("1 000"), "1000");
        assert_eq!(collapse_digit_groups("-9 999 999"), "-9999999");
        assert_eq!(collapse_digit_groups("  44  "), "44");
        assert_eq!(collapse_digit_groups("a b"), "a b");
    }

    #[test]
    fn parse_number_rejects_blank_and_garbage() {
        assert_eq!(parse_number("12.56"), Some(12.56));
        assert_eq!(parse_number("  -88  "), Some(-88.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("Some string"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn integral_numbers_go_out_as_integers() {
        assert_eq!(number_to_wire(42.0), Some(json!(42)));
        assert_eq!(number_to_wire(12.5), Some(json!(12.5)));
        assert_eq!(number_to_wire(f64::NAN), None);
    }

    #[test]
    fn render_text_brackets_lists() {
        assert_eq!(render_text(&json!([1, 2, 3])), "[1,2,3]");
        assert_eq!(render_text(&json!([null, "a", [1, 2]])), "[,a,1,2]");
        assert_eq!(render_text(&json!(true)), "true");
        assert_eq!(render_text(&json!(5)), "5");
    }

    #[test]
    fn datetime_parsing_accepts_iso_variants() {
        let expected = datetime!(2024-05-04 12:31:44 UTC);

        assert_eq!(parse_datetime("2024-05-04T12:31:44Z"), Some(expected));
        assert_eq!(parse_datetime("2024-05-04T14:31:44+02:00"), Some(expected));
        assert_eq!(parse_datetime("2024-05-04T12:31:44"), Some(expected));
        assert_eq!(parse_datetime("2024-05-04 12:31:44"), Some(expected));
        assert_eq!(
            parse_datetime("2024-05-04"),
            Some(datetime!(2024-05-04 0:00 UTC))
        );
        assert_eq!(parse_datetime("yesterday"), None);
    }

    #[test]
    fn date_parsing_takes_utc_calendar_day() {
        assert_eq!(parse_date("2024-05-04"), Some(date!(2024 - 05 - 04)));
        assert_eq!(
            parse_date("2024-05-04T23:30:00-02:00"),
            Some(date!(2024 - 05 - 05))
        );
        assert_eq!(parse_date("05/04/2024"), None);
    }

    #[test]
    fn datetime_formatting_uses_millisecond_precision() {
        let dt = datetime!(2024-05-04 12:31:44.123_456 +02:00);

        assert_eq!(
            format_datetime(dt).as_deref(),
            Some("2024-05-04T10:31:44.123Z")
        );
        assert_eq!(
            format_date(date!(2024 - 01 - 02)).as_deref(),
            Some("2024-01-02")
        );
    }

    #[test]
    fn plain_json_mirrors_structure() {
        let value = Value::map([
            ("n", Value::from(3)),
            ("tags", Value::list(["a"])),
            ("when", Value::from(date!(2020 - 02 - 29))),
        ]);

        assert_eq!(
            plain_json(&value),
            json!({"n": 3, "tags": ["a"], "when": "2020-02-29"})
        );
    }

    #[test]
    fn numeric_text_is_not_a_date_candidate() {
        assert!(looks_numeric("2024"));
        assert!(looks_numeric(""));
        assert!(!looks_numeric("2024-01-01"));
    }
}

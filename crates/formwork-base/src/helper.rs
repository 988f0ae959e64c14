use formwork_core::value::Value;
use time::{OffsetDateTime, Time};

/// Truncate to the start of the hour, keeping the offset.
#[must_use]
pub fn round_hour(dt: OffsetDateTime) -> OffsetDateTime {
    Time::from_hms(dt.hour(), 0, 0).map_or(dt, |time| dt.replace_time(time))
}

/// The current UTC hour, truncated.
#[must_use]
pub fn round_hour_now() -> OffsetDateTime {
    round_hour(OffsetDateTime::now_utc())
}

/// Factory for a field default that reads the clock on every call.
pub fn round_hour_now_factory() -> impl Fn() -> Value + Send + Sync + 'static {
    || Value::DateTime(round_hour_now())
}

///
/// TESTS
///

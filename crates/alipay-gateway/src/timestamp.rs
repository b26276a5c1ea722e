use chrono::{Local, NaiveDateTime, Timelike};

/// Layout of the `timestamp` request field: local wall-clock time, 24-hour,
/// second precision, no zone suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format `time` the way the gateway expects it in the `timestamp` field.
pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

use chrono::{DateTime, Local, TimeZone, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn local_timestamp() -> String {
    format_timestamp(&Local::now())
}

pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(TIMESTAMP_FORMAT).to_string()
}

// Unix epoch milliseconds, used by the trace side channel
pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

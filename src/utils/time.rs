use chrono::{DateTime, SecondsFormat, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Timestamps inside stored documents are RFC 3339 strings in UTC.
pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn days_since(dt: DateTime<Utc>) -> i64 {
    (now() - dt).num_days()
}

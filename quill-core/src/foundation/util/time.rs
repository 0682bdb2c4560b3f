use chrono::{DateTime, TimeZone, Utc};

/// Current wall-clock time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current wall-clock timestamp in whole seconds since the epoch.
pub fn now_secs() -> u64 {
    let secs = Utc::now().timestamp();
    if secs < 0 {
        0
    } else {
        secs as u64
    }
}

/// Epoch seconds back to a UTC timestamp, clamped at the epoch.
pub fn from_secs(secs: u64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs as i64, 0).single().unwrap_or_else(|| Utc.timestamp_opt(0, 0).single().unwrap_or_default())
}

// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Local, NaiveDate, TimeZone};

pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    d.as_millis() as u64
}

/// Local wall-clock time for an epoch timestamp.
pub fn local_time(ms: u64) -> DateTime<Local> {
    i64::try_from(ms)
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).earliest())
        .unwrap_or_else(Local::now)
}

pub fn local_day(ms: u64) -> NaiveDate {
    local_time(ms).date_naive()
}

/// Seconds between two epoch timestamps; zero if the clock went backwards.
pub fn elapsed_secs(from_ms: u64, to_ms: u64) -> f64 {
    to_ms.saturating_sub(from_ms) as f64 / 1000.0
}

//! # Time Utilities
//!
//! Epoch-millisecond helpers. Transaction timestamps are stored as epoch
//! milliseconds, the unit the frontend charts and formatters expect.

use chrono::{Duration, Utc};

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Epoch milliseconds `ago` before now.
pub fn millis_ago(ago: Duration) -> i64 {
    (Utc::now() - ago).timestamp_millis()
}

//! # Time Utilities
//!
//! Utilities for time handling using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Milliseconds since the Unix epoch, the unit realtime token requests are stamped in.
pub fn now_millis() -> i64 {
    now_utc().timestamp_millis()
}

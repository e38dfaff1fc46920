//! Timestamp utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC calendar day
///
/// Phase resolution and reminder scheduling operate at day granularity;
/// this is the "today" those evaluations compare against.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

//! Relative-time descriptions.

use chrono::{DateTime, Utc};

/// Source of "now" for relative times.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Describes how long ago `timestamp` was, bucketed by hour, day and week.
///
/// Four weeks or older falls back to the absolute `YYYY-MM-DD` date.
/// Timestamps in the future count as "less than an hour ago".
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    let weeks = elapsed.num_weeks();

    if hours < 1 {
        "less than an hour ago".to_string()
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else if weeks < 4 {
        format!("{} weeks ago", weeks)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Relative time for an optional timestamp.
pub fn describe(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    timestamp.map_or_else(|| "unknown".to_string(), |ts| relative_time(ts, now))
}

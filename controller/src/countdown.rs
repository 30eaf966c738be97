//! countdown arithmetic
//!
//! the remaining time is never stored. each tick derives it from the
//! expiry instant and the current clock reading.

use std::fmt;

use chrono::{DateTime, Utc};

pub const EXPIRED_TEXT: &str = "Expired";

/// what a single tick observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Remaining { minutes: i64, seconds: i64 },
    Expired,
}

impl CountdownStatus {
    /// classify a remaining duration in milliseconds
    pub fn from_millis(time_left_ms: i64) -> Self {
        if time_left_ms <= 0 {
            return CountdownStatus::Expired;
        }
        CountdownStatus::Remaining {
            minutes: time_left_ms / 60_000,
            seconds: (time_left_ms % 60_000) / 1000,
        }
    }

    pub fn between(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self::from_millis((expires_at - now).num_milliseconds())
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownStatus::Expired)
    }
}

impl fmt::Display for CountdownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownStatus::Remaining { minutes, seconds } => write!(f, "{}:{:02}", minutes, seconds),
            CountdownStatus::Expired => f.write_str(EXPIRED_TEXT),
        }
    }
}

/// render whole seconds as m:ss
pub fn format_seconds(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ==============================================================================
// tests
// ==============================================================================

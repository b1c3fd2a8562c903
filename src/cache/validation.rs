//! Cache freshness reporting and TTL parsing.

use anyhow::{bail, Result};
use chrono::Duration;
use std::fmt;

/// Default lifetime of a cached country table.
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// State of a country's cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    /// Entry exists and is within its TTL.
    Fresh { age: Duration },
    /// Entry exists but is older than its TTL.
    Expired { age: Duration },
    /// No entry stored.
    Missing,
    /// Entry exists but could not be read or decoded.
    Unreadable,
}

impl CacheStatus {
    /// Whether reads would be served from the cache.
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh { .. })
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh { age } => write!(f, "fresh ({} old)", format_duration(*age)),
            Self::Expired { age } => write!(f, "expired ({} old)", format_duration(*age)),
            Self::Missing => f.write_str("missing"),
            Self::Unreadable => f.write_str("unreadable"),
        }
    }
}

/// Parse a TTL string like "7d", "24h", "30m".
pub fn parse_ttl(ttl: &str) -> Result<Duration> {
    let ttl = ttl.trim().to_lowercase();

    let duration = if let Some(days) = ttl.strip_suffix('d') {
        Duration::try_days(days.parse()?)
    } else if let Some(hours) = ttl.strip_suffix('h') {
        Duration::try_hours(hours.parse()?)
    } else if let Some(mins) = ttl.strip_suffix('m') {
        Duration::try_minutes(mins.parse()?)
    } else if let Some(secs) = ttl.strip_suffix('s') {
        Duration::try_seconds(secs.parse()?)
    } else {
        // Bare numbers are seconds
        Duration::try_seconds(ttl.parse()?)
    };

    let Some(duration) = duration else {
        bail!("TTL out of range: {}", ttl);
    };
    if duration < Duration::zero() {
        bail!("TTL must not be negative: {}", ttl);
    }
    Ok(duration)
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();

    if secs >= 86400 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

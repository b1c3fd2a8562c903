//! Cache entry type.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::holiday::Holiday;

/// A cached holiday table for one country.
///
/// Serialized as `{"holidays": [...], "timestamp": <unix millis>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Holidays as returned by the last successful refresh.
    pub holidays: Vec<Holiday>,
    /// When this entry was written, in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self::at(holidays, Utc::now())
    }

    /// Create an entry stamped with `cached_at`.
    pub fn at(holidays: Vec<Holiday>, cached_at: DateTime<Utc>) -> Self {
        Self {
            holidays,
            timestamp: cached_at.timestamp_millis(),
        }
    }

    /// When this entry was written.
    pub fn cached_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Age of the entry at `now`.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.cached_at())
    }

    /// Age of the entry.
    pub fn age(&self) -> Duration {
        self.age_at(Utc::now())
    }

    /// Whether the entry is older than `ttl` at `now`.
    pub fn is_expired_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.age_at(now) > ttl
    }

    /// Whether the entry is older than `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(ttl, Utc::now())
    }

    /// Time left before the entry expires, clamped at zero.
    pub fn remaining_ttl(&self, ttl: Duration) -> Duration {
        (ttl - self.age()).max(Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::HolidayType;
    use chrono::NaiveDate;

    fn sample() -> Vec<Holiday> {
        vec![Holiday::new(
            "Hangul Day",
            NaiveDate::from_ymd_opt(2025, 10, 9).unwrap(),
            HolidayType::National,
        )]
    }

    #[test]
    fn new_entry_is_fresh() {
        let entry = CacheEntry::new(sample());

        assert!(!entry.is_expired(Duration::days(7)));
        assert!(entry.age().num_seconds() < 1);
    }

    #[test]
    fn entry_older_than_ttl_is_expired() {
        let entry = CacheEntry::at(sample(), Utc::now() - Duration::days(8));

        assert!(entry.is_expired(Duration::days(7)));
        assert_eq!(entry.remaining_ttl(Duration::days(7)), Duration::zero());
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let cached_at = Utc::now();
        let entry = CacheEntry::at(sample(), cached_at);
        let ttl = Duration::days(7);

        assert!(!entry.is_expired_at(ttl, cached_at + ttl));
        assert!(entry.is_expired_at(ttl, cached_at + ttl + Duration::milliseconds(1)));
    }

    #[test]
    fn remaining_ttl_calculation() {
        let entry = CacheEntry::new(sample());

        let remaining = entry.remaining_ttl(Duration::hours(1));
        assert!(remaining.num_seconds() > 3590);
        assert!(remaining.num_seconds() <= 3600);
    }

    #[test]
    fn serializes_holidays_and_millisecond_timestamp() {
        let cached_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let entry = CacheEntry::at(sample(), cached_at);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["timestamp"], 1_735_689_600_000_i64);
        assert_eq!(value["holidays"][0]["name"], "Hangul Day");
        assert_eq!(value["holidays"][0]["date"], "2025-10-09");
    }

    #[test]
    fn deserializes_stored_entry() {
        let json = r#"{"holidays":[{"name":"Hangul Day","date":"2025-10-09","type":"national"}],"timestamp":1735689600000}"#;
        let entry: CacheEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.holidays, sample());
        assert_eq!(
            entry.cached_at(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
    }
}

//! Namespaced holiday cache on top of a [`KeyValueStore`].
//!
//! Each country is stored under `<namespace><CODE>` as a JSON
//! [`CacheEntry`]. Reads through [`HolidayCache::read`] never fail: a
//! missing, expired, empty or undecodable entry is a miss.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use super::backend::KeyValueStore;
use super::entry::CacheEntry;
use super::validation::{CacheStatus, DEFAULT_TTL_DAYS};
use crate::holiday::Holiday;

/// Default key prefix for cached country tables.
pub const DEFAULT_NAMESPACE: &str = "holidays_cache_";

/// Per-country holiday cache with a flat TTL.
#[derive(Clone)]
pub struct HolidayCache {
    backend: Arc<dyn KeyValueStore>,
    namespace: String,
    ttl: Duration,
    known_countries: Vec<String>,
}

impl HolidayCache {
    /// Create a cache with the default namespace and a 7-day TTL.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            namespace: DEFAULT_NAMESPACE.to_string(),
            ttl: Duration::days(DEFAULT_TTL_DAYS),
            known_countries: Vec::new(),
        }
    }

    /// Use a different key prefix.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Use a different TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Countries whose entries are removed by [`clear`](Self::clear) and
    /// checked by [`cleanup_expired`](Self::cleanup_expired) even when the
    /// backend cannot list them.
    pub fn with_known_countries<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_countries = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Key prefix for this cache.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Storage key for a country.
    pub fn key(&self, code: &str) -> String {
        format!("{}{}", self.namespace, code)
    }

    /// Load and decode the raw entry for a country, regardless of age.
    pub fn load(&self, code: &str) -> Result<Option<CacheEntry>> {
        let key = self.key(code);
        let Some(json) = self.backend.get(&key)? else {
            return Ok(None);
        };

        let entry = serde_json::from_str(&json)
            .with_context(|| format!("Malformed cache entry under {}", key))?;
        Ok(Some(entry))
    }

    /// Fresh, non-empty cached holidays for a country.
    pub fn read(&self, code: &str) -> Option<Vec<Holiday>> {
        self.read_at(code, Utc::now())
    }

    /// Like [`read`](Self::read), judging freshness at `now`.
    pub fn read_at(&self, code: &str, now: DateTime<Utc>) -> Option<Vec<Holiday>> {
        let entry = match self.load(code) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!("No cached holidays for {}", code);
                return None;
            }
            Err(e) => {
                warn!("Ignoring unreadable holiday cache for {}: {:#}", code, e);
                return None;
            }
        };

        if entry.is_expired_at(self.ttl, now) {
            debug!("Cached holidays for {} expired", code);
            return None;
        }

        if entry.holidays.is_empty() {
            debug!("Cached holidays for {} are empty", code);
            return None;
        }

        debug!(
            "Serving {} cached holidays for {}",
            entry.holidays.len(),
            code
        );
        Some(entry.holidays)
    }

    /// Replace the entry for a country, stamped with the current time.
    pub fn write(&self, code: &str, holidays: &[Holiday]) -> Result<CacheEntry> {
        let entry = CacheEntry::new(holidays.to_vec());
        self.put(code, &entry)?;
        Ok(entry)
    }

    /// Store a prepared entry for a country.
    pub fn put(&self, code: &str, entry: &CacheEntry) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        self.backend
            .set(&self.key(code), &json)
            .with_context(|| format!("Failed to cache holidays for {}", code))
    }

    /// Freshness of a country's entry.
    pub fn status(&self, code: &str) -> CacheStatus {
        self.status_at(code, Utc::now())
    }

    /// Freshness of a country's entry at `now`.
    pub fn status_at(&self, code: &str, now: DateTime<Utc>) -> CacheStatus {
        match self.load(code) {
            Ok(Some(entry)) => {
                let age = entry.age_at(now);
                if entry.is_expired_at(self.ttl, now) {
                    CacheStatus::Expired { age }
                } else {
                    CacheStatus::Fresh { age }
                }
            }
            Ok(None) => CacheStatus::Missing,
            Err(e) => {
                debug!("Cache entry for {} is unreadable: {:#}", code, e);
                CacheStatus::Unreadable
            }
        }
    }

    /// Stored keys under this cache's namespace.
    fn namespaced_keys(&self) -> Result<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(&self.namespace))
            .collect())
    }

    /// Country codes that currently have an entry, fresh or not.
    pub fn cached_countries(&self) -> Vec<String> {
        match self.namespaced_keys() {
            Ok(keys) => keys
                .into_iter()
                .map(|k| k[self.namespace.len()..].to_string())
                .collect(),
            Err(e) => {
                warn!("Failed to list holiday cache: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Listed countries plus the known ones, sorted and deduplicated.
    fn candidate_countries(&self) -> Vec<String> {
        let mut codes = self.cached_countries();
        codes.extend(self.known_countries.iter().cloned());
        codes.sort();
        codes.dedup();
        codes
    }

    /// Remove every entry under the namespace. Returns how many were removed.
    ///
    /// Entries for known countries are removed by key, so they go even when
    /// the backend could not decode them while listing.
    pub fn clear(&self) -> usize {
        let mut removed = 0;
        for code in self.candidate_countries() {
            let key = self.key(&code);
            match self.backend.remove(&key) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to remove {}: {:#}", key, e),
            }
        }

        debug!("Cleared {} cached holiday tables", removed);
        removed
    }

    /// Remove expired or unreadable entries. Returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;

        for code in self.candidate_countries() {
            match self.status_at(&code, now) {
                CacheStatus::Fresh { .. } | CacheStatus::Missing => continue,
                CacheStatus::Expired { .. } | CacheStatus::Unreadable => {}
            }
            match self.backend.remove(&self.key(&code)) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to remove cached holidays for {}: {:#}", code, e),
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::backend::{FileStore, MemoryStore};
    use crate::holiday::HolidayType;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn cache() -> (Arc<MemoryStore>, HolidayCache) {
        let backend = Arc::new(MemoryStore::new());
        let cache = HolidayCache::new(backend.clone());
        (backend, cache)
    }

    fn sample() -> Vec<Holiday> {
        vec![Holiday::new(
            "Liberation Day",
            NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
            HolidayType::National,
        )]
    }

    #[test]
    fn keys_are_namespaced() {
        let (_, cache) = cache();
        assert_eq!(cache.key("KR"), "holidays_cache_KR");

        let custom = cache.with_namespace("app:");
        assert_eq!(custom.key("KR"), "app:KR");
    }

    #[test]
    fn defaults() {
        let (_, cache) = cache();
        assert_eq!(cache.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(cache.ttl(), Duration::days(7));
    }

    #[test]
    fn write_then_read() {
        let (backend, cache) = cache();

        cache.write("KR", &sample()).unwrap();

        assert_eq!(cache.read("KR"), Some(sample()));
        assert!(backend.get("holidays_cache_KR").unwrap().is_some());
    }

    #[test]
    fn read_missing_is_none() {
        let (_, cache) = cache();
        assert_eq!(cache.read("KR"), None);
        assert_eq!(cache.status("KR"), CacheStatus::Missing);
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let (_, cache) = cache();
        let stale = CacheEntry::at(sample(), Utc::now() - Duration::days(8));
        cache.put("KR", &stale).unwrap();

        assert_eq!(cache.read("KR"), None);
        assert!(matches!(cache.status("KR"), CacheStatus::Expired { .. }));
    }

    #[test]
    fn read_at_respects_clock() {
        let (_, cache) = cache();
        let entry = cache.write("KR", &sample()).unwrap();
        let later = entry.cached_at() + Duration::days(7) + Duration::seconds(1);

        assert_eq!(cache.read_at("KR", later), None);
        assert!(cache.read_at("KR", entry.cached_at()).is_some());
    }

    #[test]
    fn empty_entry_is_a_miss() {
        let (_, cache) = cache();
        cache.write("KR", &[]).unwrap();

        assert_eq!(cache.read("KR"), None);
        assert!(cache.status("KR").is_fresh());
    }

    #[test]
    fn malformed_entry_is_a_miss() {
        let (backend, cache) = cache();
        backend.set("holidays_cache_KR", "{not json").unwrap();

        assert_eq!(cache.read("KR"), None);
        assert_eq!(cache.status("KR"), CacheStatus::Unreadable);
        assert!(cache.load("KR").is_err());
    }

    #[test]
    fn clear_only_touches_namespace() {
        let (backend, cache) = cache();
        cache.write("KR", &sample()).unwrap();
        cache.write("US", &sample()).unwrap();
        backend.set("unrelated", "keep me").unwrap();

        assert_eq!(cache.clear(), 2);
        assert!(cache.cached_countries().is_empty());
        assert_eq!(backend.get("unrelated").unwrap().as_deref(), Some("keep me"));
    }

    #[test]
    fn cached_countries_strip_namespace() {
        let (_, cache) = cache();
        cache.write("JP", &sample()).unwrap();
        cache.write("KR", &sample()).unwrap();

        assert_eq!(cache.cached_countries(), vec!["JP", "KR"]);
    }

    #[test]
    fn cleanup_removes_expired_and_unreadable() {
        let (backend, cache) = cache();
        cache.write("KR", &sample()).unwrap();
        cache
            .put("US", &CacheEntry::at(sample(), Utc::now() - Duration::days(30)))
            .unwrap();
        backend.set("holidays_cache_JP", "garbage").unwrap();

        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.cached_countries(), vec!["KR"]);
    }

    #[test]
    fn clear_removes_known_countries_the_backend_cannot_list() {
        let temp = TempDir::new().unwrap();
        let backend = Arc::new(FileStore::new(temp.path()));
        let cache = HolidayCache::new(backend.clone()).with_known_countries(["KR", "US"]);

        cache.write("KR", &sample()).unwrap();
        cache.write("US", &sample()).unwrap();
        fs::write(backend.path_for("holidays_cache_KR"), "{garbage").unwrap();

        assert_eq!(cache.cached_countries(), vec!["US"]);
        assert_eq!(cache.clear(), 2);
        assert!(!backend.path_for("holidays_cache_KR").exists());
        assert!(!backend.path_for("holidays_cache_US").exists());
    }

    #[test]
    fn cleanup_removes_corrupt_files_of_known_countries() {
        let temp = TempDir::new().unwrap();
        let backend = Arc::new(FileStore::new(temp.path()));
        let cache = HolidayCache::new(backend.clone()).with_known_countries(["JP", "KR"]);

        cache.write("KR", &sample()).unwrap();
        cache.write("JP", &sample()).unwrap();
        fs::write(backend.path_for("holidays_cache_JP"), "{garbage").unwrap();

        assert_eq!(cache.status("JP"), CacheStatus::Unreadable);
        assert_eq!(cache.cleanup_expired(), 1);
        assert!(!backend.path_for("holidays_cache_JP").exists());
        assert!(cache.read("KR").is_some());
    }
}

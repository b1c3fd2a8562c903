//! The holiday store facade.
//!
//! [`HolidayStore`] answers point and range queries over the compiled-in
//! dataset, serves refreshed tables from the cache while they are fresh,
//! and refreshes tables from the remote endpoint on request.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use holidays::{HolidayStore, StoreConfig};
//!
//! let store = HolidayStore::with_memory_cache(StoreConfig::default()).unwrap();
//!
//! let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! assert!(store.is_holiday("KR", new_year));
//!
//! let next = store.next_holiday("KR", Some(new_year)).unwrap();
//! assert_eq!(next.date, NaiveDate::from_ymd_opt(2024, 2, 9).unwrap());
//! ```

pub mod source;

pub use source::{resolve, CacheTier, HolidaySource, LocalTier};

use chrono::{Datelike, Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::{CacheStatus, HolidayCache, KeyValueStore, MemoryStore};
use crate::config::{RefreshPolicy, StoreConfig};
use crate::dataset::{LocalDataset, SUPPORTED_YEARS};
use crate::error::{HolidayError, Result};
use crate::fetch::HolidayFetcher;
use crate::holiday::Holiday;

/// Holiday lookups with an optional refreshed cache.
pub struct HolidayStore {
    config: StoreConfig,
    dataset: &'static LocalDataset,
    cache: HolidayCache,
    fetcher: HolidayFetcher,
}

/// Canonical form of a country code.
fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl HolidayStore {
    /// Create a store persisting its cache through `backend`.
    pub fn new(config: StoreConfig, backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let ttl = config
            .cache_ttl()
            .map_err(|e| HolidayError::ConfigParseError {
                path: "<config>".into(),
                message: format!("invalid cache_ttl '{}': {}", config.cache_ttl, e),
            })?;

        if config.timeout == 0 {
            return Err(HolidayError::ConfigParseError {
                path: "<config>".into(),
                message: "timeout must be at least one second".into(),
            });
        }

        let dataset = LocalDataset::global();
        let cache = HolidayCache::new(backend)
            .with_namespace(config.namespace.clone())
            .with_ttl(ttl)
            .with_known_countries(dataset.country_codes());
        let fetcher = HolidayFetcher::with_timeout(config.base_url.clone(), config.timeout())?;

        Ok(Self {
            config,
            dataset,
            cache,
            fetcher,
        })
    }

    /// Create a store whose cache lives only as long as the process.
    pub fn with_memory_cache(config: StoreConfig) -> Result<Self> {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the cache.
    pub fn cache(&self) -> &HolidayCache {
        &self.cache
    }

    /// Get the compiled-in dataset.
    pub fn local(&self) -> &LocalDataset {
        self.dataset
    }

    /// Holidays for a country, optionally limited to one year.
    ///
    /// Served from the cache when a fresh, non-empty entry exists, otherwise
    /// from the compiled-in dataset. Unknown countries yield an empty list.
    pub fn list(&self, code: &str, year: Option<i32>) -> Vec<Holiday> {
        let code = normalize(code);
        let cache_tier = CacheTier::new(&self.cache);
        let local_tier = LocalTier::new(self.dataset);

        let chain: [&dyn HolidaySource; 2] = [&cache_tier, &local_tier];

        let mut holidays = resolve(&chain, &code);
        if let Some(year) = year {
            holidays.retain(|h| h.date.year() == year);
        }
        holidays
    }

    /// Refresh one country, or every supported country when `code` is `None`.
    ///
    /// A single-country refresh returns the fetched holidays or the error.
    /// A full refresh fetches countries one at a time in enumeration order
    /// and concatenates the results; failures are handled according to the
    /// configured [`RefreshPolicy`].
    pub fn refresh(&self, code: Option<&str>) -> Result<Vec<Holiday>> {
        match code {
            Some(code) => self.refresh_country(code),
            None => self.refresh_all(),
        }
    }

    /// Fetch one country's table and replace its cache entry.
    pub fn refresh_country(&self, code: &str) -> Result<Vec<Holiday>> {
        let code = normalize(code);
        let holidays = self.fetcher.fetch(&code)?;

        if let Err(e) = self.cache.write(&code, &holidays) {
            warn!("Failed to cache refreshed holidays for {}: {:#}", code, e);
        }

        info!("Refreshed {} holidays for {}", holidays.len(), code);
        Ok(holidays)
    }

    fn refresh_all(&self) -> Result<Vec<Holiday>> {
        let mut all = Vec::new();
        let mut first_error = None;
        let mut succeeded = 0;

        for code in self.supported_countries() {
            match self.refresh_country(code) {
                Ok(holidays) => {
                    succeeded += 1;
                    all.extend(holidays);
                }
                Err(e) => match self.config.refresh_policy {
                    RefreshPolicy::FallbackToDefault => {
                        // Everything fetched so far is dropped from the result.
                        let fallback = normalize(&self.config.fallback_country);
                        warn!(
                            "Refresh of {} failed ({}); returning local {} holidays",
                            code, e, fallback
                        );
                        return Ok(self.dataset.holidays(&fallback).to_vec());
                    }
                    RefreshPolicy::PartialSuccess => {
                        warn!("Refresh of {} failed, skipping: {}", code, e);
                        first_error.get_or_insert(e);
                    }
                },
            }
        }

        match first_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(all),
        }
    }

    /// Whether `date` is a holiday in the compiled-in table for `code`.
    pub fn is_holiday(&self, code: &str, date: NaiveDate) -> bool {
        self.dataset
            .holidays(&normalize(code))
            .iter()
            .any(|h| h.is_on(date))
    }

    /// Whether today (local time) is a holiday for `code`.
    pub fn is_today_holiday(&self, code: &str) -> bool {
        self.is_holiday(code, today())
    }

    /// Every compiled-in holiday for `code` falling on `date`.
    pub fn holidays_on(&self, code: &str, date: NaiveDate) -> Vec<Holiday> {
        self.dataset
            .holidays(&normalize(code))
            .iter()
            .filter(|h| h.is_on(date))
            .cloned()
            .collect()
    }

    /// Compiled-in holidays with `start <= date <= end`, in dataset order.
    pub fn holidays_between(&self, code: &str, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        self.dataset
            .holidays(&normalize(code))
            .iter()
            .filter(|h| h.date >= start && h.date <= end)
            .cloned()
            .collect()
    }

    /// The first compiled-in holiday strictly after `from` (default today).
    ///
    /// Holidays sharing the earliest date are returned in dataset order.
    pub fn next_holiday(&self, code: &str, from: Option<NaiveDate>) -> Option<Holiday> {
        self.upcoming(code, from, 1).into_iter().next()
    }

    /// Up to `limit` compiled-in holidays strictly after `from` (default
    /// today), ascending by date.
    pub fn upcoming(&self, code: &str, from: Option<NaiveDate>, limit: usize) -> Vec<Holiday> {
        let from = from.unwrap_or_else(today);

        let mut candidates: Vec<&Holiday> = self
            .dataset
            .holidays(&normalize(code))
            .iter()
            .filter(|h| h.date > from)
            .collect();
        // Stable, so ties keep dataset order.
        candidates.sort_by_key(|h| h.date);

        candidates.into_iter().take(limit).cloned().collect()
    }

    /// Country codes with a compiled-in table, in enumeration order.
    pub fn supported_countries(&self) -> Vec<&str> {
        self.dataset.country_codes()
    }

    /// Years covered by the compiled-in tables.
    pub fn supported_years(&self) -> &'static [i32] {
        &SUPPORTED_YEARS
    }

    /// Display name of a supported country.
    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.dataset.country_name(&normalize(code))
    }

    /// Freshness of a country's cache entry.
    pub fn cache_status(&self, code: &str) -> CacheStatus {
        self.cache.status(&normalize(code))
    }

    /// Remove expired or unreadable cache entries. Returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.cache.cleanup_expired()
    }

    /// Remove every cache entry under this store's namespace.
    pub fn clear_cache(&self) {
        let removed = self.cache.clear();
        info!("Cleared {} cached holiday tables", removed);
    }
}

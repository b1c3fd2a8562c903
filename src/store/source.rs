//! Read tiers for holiday lookups.
//!
//! A read walks an ordered chain of [`HolidaySource`]s and takes the first
//! answer. The store's chain is the cache tier followed by the compiled-in
//! tier, which always answers.

use crate::cache::HolidayCache;
use crate::dataset::LocalDataset;
use crate::holiday::Holiday;

/// One tier of the read chain.
pub trait HolidaySource {
    /// Short label used in logs.
    fn label(&self) -> &'static str;

    /// Holidays for `code`, or `None` to defer to the next tier.
    fn holidays(&self, code: &str) -> Option<Vec<Holiday>>;
}

/// Fresh, non-empty cache entries.
pub struct CacheTier<'a> {
    cache: &'a HolidayCache,
}

impl<'a> CacheTier<'a> {
    pub fn new(cache: &'a HolidayCache) -> Self {
        Self { cache }
    }
}

impl HolidaySource for CacheTier<'_> {
    fn label(&self) -> &'static str {
        "cache"
    }

    fn holidays(&self, code: &str) -> Option<Vec<Holiday>> {
        self.cache.read(code)
    }
}

/// The compiled-in dataset. Unknown codes answer with an empty table.
pub struct LocalTier<'a> {
    dataset: &'a LocalDataset,
}

impl<'a> LocalTier<'a> {
    pub fn new(dataset: &'a LocalDataset) -> Self {
        Self { dataset }
    }
}

impl HolidaySource for LocalTier<'_> {
    fn label(&self) -> &'static str {
        "local"
    }

    fn holidays(&self, code: &str) -> Option<Vec<Holiday>> {
        Some(self.dataset.holidays(code).to_vec())
    }
}

/// First answer from `chain`, or an empty table if no tier answers.
pub fn resolve(chain: &[&dyn HolidaySource], code: &str) -> Vec<Holiday> {
    for source in chain {
        if let Some(holidays) = source.holidays(code) {
            tracing::debug!("Holidays for {} served from {} tier", code, source.label());
            return holidays;
        }
    }
    Vec::new()
}

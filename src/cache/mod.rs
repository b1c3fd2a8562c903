//! Holiday caching.
//!
//! Refreshed country tables are persisted through a pluggable
//! [`KeyValueStore`] and expire after a flat TTL (7 days by default).

pub mod backend;
pub mod entry;
pub mod store;
pub mod validation;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use entry::CacheEntry;
pub use store::{HolidayCache, DEFAULT_NAMESPACE};
pub use validation::{format_duration, parse_ttl, CacheStatus, DEFAULT_TTL_DAYS};

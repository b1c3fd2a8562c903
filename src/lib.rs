//! Holidays - public holiday tables with an optional refreshed cache.
//!
//! The crate ships holiday tables for a fixed set of countries and years,
//! answers lookups against them, and can refresh a country's table from a
//! remote JSON endpoint, keeping the result in a key-value cache for a
//! week.
//!
//! # Modules
//!
//! - [`cache`] - Cache entries, key-value backends and the namespaced cache
//! - [`config`] - Store configuration
//! - [`dataset`] - Compiled-in holiday tables
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Remote holiday fetching
//! - [`holiday`] - Holiday records and their JSON wire format
//! - [`store`] - The [`HolidayStore`] facade
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use holidays::{HolidayStore, StoreConfig};
//!
//! let store = HolidayStore::with_memory_cache(StoreConfig::default()).unwrap();
//!
//! // Reads fall back to the compiled-in tables until a refresh succeeds
//! let kr_2024 = store.list("KR", Some(2024));
//! assert!(kr_2024.iter().any(|h| h.name == "Chuseok"));
//!
//! let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
//! assert!(store.is_holiday("US", christmas));
//! ```
//!
//! Refreshing talks to the network; see the integration tests for a
//! mocked endpoint.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod holiday;
pub mod store;

pub use config::{RefreshPolicy, StoreConfig};
pub use error::{HolidayError, Result};
pub use holiday::{Holiday, HolidayType};
pub use store::HolidayStore;

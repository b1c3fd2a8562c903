//! Remote holiday fetching.

pub mod http;

pub use http::{HolidayFetcher, DEFAULT_TIMEOUT};

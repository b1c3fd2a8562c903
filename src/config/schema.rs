//! Store configuration schema.
//!
//! Every field has a default, so an empty document is a valid configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::cache::{parse_ttl, DEFAULT_NAMESPACE};

/// What a refresh of every country does when one country fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Abandon the whole refresh on the first failure and return the
    /// fallback country's local table. Results already fetched for other
    /// countries are discarded (their cache entries stay written).
    #[default]
    FallbackToDefault,
    /// Keep every country that succeeded and skip the ones that failed.
    PartialSuccess,
}

/// Configuration for a [`HolidayStore`](crate::HolidayStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the refresh endpoint.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Cache lifetime, e.g. "7d", "24h", "30m".
    pub cache_ttl: String,

    /// Key prefix for cache entries.
    pub namespace: String,

    /// Country whose local table is returned when a full refresh falls back.
    pub fallback_country: String,

    /// Failure handling for full refreshes.
    pub refresh_policy: RefreshPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            cache_ttl: default_cache_ttl(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            fallback_country: default_fallback_country(),
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://holidays.example.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_cache_ttl() -> String {
    "7d".to_string()
}

fn default_fallback_country() -> String {
    "KR".to_string()
}

impl StoreConfig {
    /// Request timeout.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout)
    }

    /// Parsed cache lifetime.
    pub fn cache_ttl(&self) -> anyhow::Result<Duration> {
        parse_ttl(&self.cache_ttl)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the full-refresh failure policy.
    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.refresh_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.timeout(), std::time::Duration::from_secs(10));
        assert_eq!(config.cache_ttl().unwrap(), Duration::days(7));
        assert_eq!(config.namespace, "holidays_cache_");
        assert_eq!(config.fallback_country, "KR");
        assert_eq!(config.refresh_policy, RefreshPolicy::FallbackToDefault);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: StoreConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
base_url: https://cdn.example.org/data
timeout: 5
cache_ttl: 12h
namespace: "app:holidays:"
fallback_country: US
refresh_policy: partial_success
"#;
        let config: StoreConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.base_url, "https://cdn.example.org/data");
        assert_eq!(config.timeout(), std::time::Duration::from_secs(5));
        assert_eq!(config.cache_ttl().unwrap(), Duration::hours(12));
        assert_eq!(config.namespace, "app:holidays:");
        assert_eq!(config.fallback_country, "US");
        assert_eq!(config.refresh_policy, RefreshPolicy::PartialSuccess);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result: Result<StoreConfig, _> = serde_yaml::from_str("refresh_policy: retry");
        assert!(result.is_err());
    }

    #[test]
    fn builder_methods() {
        let config = StoreConfig::default()
            .with_base_url("http://localhost:8080")
            .with_refresh_policy(RefreshPolicy::PartialSuccess);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.refresh_policy, RefreshPolicy::PartialSuccess);
    }
}

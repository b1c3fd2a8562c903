//! HTTP holiday fetching.
//!
//! One GET per country against `<base-url>/holidays/<code>.json`, no
//! retries. Anything but `200 OK` with a valid payload is an error.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::error::{HolidayError, Result};
use crate::holiday::{decode_payload, Holiday};

/// Per-request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches country holiday tables over HTTP/HTTPS.
pub struct HolidayFetcher {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HolidayFetcher {
    /// Create a fetcher with the default 10-second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("holidays")
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::Error::new(e).context("Failed to build HTTP client"))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a country's holiday table.
    pub fn url_for(&self, code: &str) -> String {
        format!(
            "{}/holidays/{}.json",
            self.base_url.trim_end_matches('/'),
            code.to_ascii_lowercase()
        )
    }

    /// Fetch and decode a country's holiday table.
    pub fn fetch(&self, code: &str) -> Result<Vec<Holiday>> {
        let url = self.url_for(code);
        debug!("Fetching holidays for {} from {}", code, url);

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .map_err(|e| self.request_failed(code, &e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HolidayError::UnexpectedStatus {
                country: code.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| self.request_failed(code, &e))?;

        decode_payload(&body).map_err(|e| HolidayError::InvalidPayload {
            country: code.to_string(),
            message: e.to_string(),
        })
    }

    fn request_failed(&self, code: &str, err: &reqwest::Error) -> HolidayError {
        let message = if err.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs())
        } else {
            err.to_string()
        };

        HolidayError::RequestFailed {
            country: code.to_string(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::HolidayType;
    use httpmock::prelude::*;

    const KR_BODY: &str = r#"{"holidays": [
        {"name": "New Year's Day", "date": "2024-01-01", "type": "national",
         "description": {"en": "New Year's Day", "ko": "신정"}},
        {"name": "Christmas Day", "date": "2024-12-25", "type": "religious",
         "description": "Christmas Day"}
    ]}"#;

    #[test]
    fn default_timeout_is_10_seconds() {
        let fetcher = HolidayFetcher::new("https://example.com").unwrap();
        assert_eq!(fetcher.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn custom_timeout() {
        let fetcher =
            HolidayFetcher::with_timeout("https://example.com", Duration::from_secs(3)).unwrap();
        assert_eq!(fetcher.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn url_lowercases_country_code() {
        let fetcher = HolidayFetcher::new("https://example.com/").unwrap();
        assert_eq!(fetcher.base_url(), "https://example.com/");
        assert_eq!(
            fetcher.url_for("KR"),
            "https://example.com/holidays/kr.json"
        );
    }

    #[test]
    fn fetch_decodes_holidays() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/holidays/kr.json")
                .header("Content-Type", "application/json");
            then.status(200).body(KR_BODY);
        });

        let fetcher = HolidayFetcher::new(server.base_url()).unwrap();
        let holidays = fetcher.fetch("KR").unwrap();

        mock.assert();
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[1].kind, HolidayType::Religious);
        assert_eq!(holidays[1].description("ko"), Some("Christmas Day"));
    }

    #[test]
    fn fetch_reports_status_and_country() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/holidays/us.json");
            then.status(404).body("Not Found");
        });

        let fetcher = HolidayFetcher::new(server.base_url()).unwrap();
        let err = fetcher.fetch("US").unwrap_err();

        assert!(matches!(
            err,
            HolidayError::UnexpectedStatus { ref country, status: 404 } if country == "US"
        ));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn non_200_success_status_is_a_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/holidays/jp.json");
            then.status(204);
        });

        let fetcher = HolidayFetcher::new(server.base_url()).unwrap();
        assert!(matches!(
            fetcher.fetch("JP"),
            Err(HolidayError::UnexpectedStatus { status: 204, .. })
        ));
    }

    #[test]
    fn malformed_body_is_invalid_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/holidays/kr.json");
            then.status(200).body(r#"{"items": []}"#);
        });

        let fetcher = HolidayFetcher::new(server.base_url()).unwrap();
        assert!(matches!(
            fetcher.fetch("KR"),
            Err(HolidayError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn slow_response_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/holidays/kr.json");
            then.status(200)
                .body(KR_BODY)
                .delay(Duration::from_millis(1500));
        });

        let fetcher =
            HolidayFetcher::with_timeout(server.base_url(), Duration::from_millis(200)).unwrap();
        let err = fetcher.fetch("KR").unwrap_err();

        assert!(matches!(err, HolidayError::RequestFailed { .. }));
        assert_eq!(err.country(), Some("KR"));
    }

    #[test]
    fn unreachable_host_is_request_failure() {
        let fetcher =
            HolidayFetcher::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert!(matches!(
            fetcher.fetch("KR"),
            Err(HolidayError::RequestFailed { .. })
        ));
    }
}

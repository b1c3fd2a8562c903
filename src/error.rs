//! Error types for holiday operations.
//!
//! This module defines [`HolidayError`], the error type returned by the
//! fallible parts of the public API, and a [`Result`] alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Refresh failures for a single country surface as `HolidayError`
//! - Cache reads and writes never surface; they are logged and recovered
//! - Persistence backends use `anyhow::Error` internally (via `HolidayError::Other`)

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for holiday operations.
#[derive(Debug, Error)]
pub enum HolidayError {
    /// The request never produced a response (connection error, timeout).
    #[error("Failed to fetch holidays for {country}: {message}")]
    RequestFailed { country: String, message: String },

    /// The endpoint answered with something other than 200 OK.
    #[error("Failed to fetch holidays for {country}: HTTP {status}")]
    UnexpectedStatus { country: String, status: u16 },

    /// The response body was not a valid holiday payload.
    #[error("Invalid holiday payload for {country}: {message}")]
    InvalidPayload { country: String, message: String },

    /// An embedded dataset file could not be parsed.
    #[error("Failed to parse dataset at {path}: {message}")]
    DatasetParseError { path: PathBuf, message: String },

    /// Failed to parse a store configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HolidayError {
    /// Country code the error refers to, if it came from a refresh.
    pub fn country(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { country, .. }
            | Self::UnexpectedStatus { country, .. }
            | Self::InvalidPayload { country, .. } => Some(country.as_str()),
            _ => None,
        }
    }
}

/// Result type alias for holiday operations.
pub type Result<T> = std::result::Result<T, HolidayError>;

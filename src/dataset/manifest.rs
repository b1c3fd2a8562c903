//! Dataset manifest definitions.
//!
//! The manifest lists the countries shipped with the crate, in the order
//! they are enumerated and refreshed.

use serde::{Deserialize, Serialize};

/// Manifest describing the embedded holiday files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Manifest version.
    #[serde(default = "default_manifest_version")]
    pub version: u32,

    /// Years covered by every country file.
    #[serde(default)]
    pub years: Vec<i32>,

    /// Countries in enumeration order.
    #[serde(default)]
    pub countries: Vec<CountryInfo>,
}

fn default_manifest_version() -> u32 {
    1
}

/// A country shipped with the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryInfo {
    /// Uppercase country code.
    pub code: String,

    /// Human-readable name.
    pub name: String,

    /// Path of the holiday file, relative to the data directory.
    pub file: String,
}

impl DatasetManifest {
    /// Country codes in enumeration order.
    pub fn country_codes(&self) -> Vec<&str> {
        self.countries.iter().map(|c| c.code.as_str()).collect()
    }

    /// Look up a country by code.
    pub fn country(&self, code: &str) -> Option<&CountryInfo> {
        self.countries.iter().find(|c| c.code == code)
    }
}

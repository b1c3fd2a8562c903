//! Holiday tables embedded at compile time.

use crate::error::{HolidayError, Result};
use crate::holiday::{decode_payload, Holiday};
use include_dir::{include_dir, Dir};
use std::path::Path;
use std::sync::LazyLock;

use super::manifest::DatasetManifest;

/// Embedded data directory.
static DATA_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/data");

static LOCAL_DATASET: LazyLock<LocalDataset> = LazyLock::new(|| {
    LocalDataset::load().expect("Embedded holiday dataset should always load")
});

/// Years covered by the embedded dataset.
pub const SUPPORTED_YEARS: [i32; 3] = [2024, 2025, 2026];

/// Load the embedded dataset manifest.
pub fn load_manifest() -> Result<DatasetManifest> {
    let content = read_utf8(&DATA_DIR, "manifest.yml")?;

    serde_yaml::from_str(content).map_err(|e| HolidayError::DatasetParseError {
        path: "data/manifest.yml".into(),
        message: e.to_string(),
    })
}

fn read_utf8<'a>(dir: &'a Dir<'a>, path: &str) -> Result<&'a str> {
    let file = dir
        .get_file(path)
        .ok_or_else(|| HolidayError::DatasetParseError {
            path: Path::new("data").join(path),
            message: "File not embedded".to_string(),
        })?;

    file.contents_utf8()
        .ok_or_else(|| HolidayError::DatasetParseError {
            path: Path::new("data").join(path),
            message: "Invalid UTF-8".to_string(),
        })
}

/// The compiled-in holiday tables, one per supported country.
#[derive(Debug, Clone)]
pub struct LocalDataset {
    manifest: DatasetManifest,
    /// Country code and holidays, in manifest order.
    countries: Vec<(String, Vec<Holiday>)>,
}

impl LocalDataset {
    /// Parse the embedded manifest and every country file it lists.
    pub fn load() -> Result<Self> {
        let manifest = load_manifest()?;
        let mut countries = Vec::with_capacity(manifest.countries.len());

        for country in &manifest.countries {
            let content = read_utf8(&DATA_DIR, &country.file)?;
            let holidays =
                decode_payload(content).map_err(|e| HolidayError::DatasetParseError {
                    path: Path::new("data").join(&country.file),
                    message: e.to_string(),
                })?;
            countries.push((country.code.clone(), holidays));
        }

        Ok(Self {
            manifest,
            countries,
        })
    }

    /// The process-wide dataset, parsed on first use.
    pub fn global() -> &'static LocalDataset {
        &LOCAL_DATASET
    }

    /// Holidays for a country in dataset order. Unknown codes yield an
    /// empty slice.
    pub fn holidays(&self, code: &str) -> &[Holiday] {
        self.countries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, holidays)| holidays.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the dataset has a table for `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.countries.iter().any(|(c, _)| c == code)
    }

    /// Country codes in manifest order.
    pub fn country_codes(&self) -> Vec<&str> {
        self.countries.iter().map(|(c, _)| c.as_str()).collect()
    }

    /// Display name of a country.
    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.manifest.country(code).map(|c| c.name.as_str())
    }

    /// Get the manifest.
    pub fn manifest(&self) -> &DatasetManifest {
        &self.manifest
    }
}

//! Compiled-in holiday dataset.
//!
//! The tables under `data/` are embedded with `include_dir` and parsed once
//! per process. They are the fallback tier for every read and the only
//! source for the synchronous date checks.

pub mod builtin;
pub mod manifest;

pub use builtin::{load_manifest, LocalDataset, SUPPORTED_YEARS};
pub use manifest::{CountryInfo, DatasetManifest};

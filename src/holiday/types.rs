//! Holiday value types.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::wire::WireHoliday;

/// Language used when the requested description is missing.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Category of a holiday.
///
/// Unrecognized tags decode to [`HolidayType::National`] rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum HolidayType {
    /// Nationwide public holiday.
    #[default]
    National,
    /// Religious holiday.
    Religious,
    /// Observed but not a day off.
    Observance,
    /// Holiday in part of the country only.
    Regional,
}

impl HolidayType {
    /// Map a wire tag to a type. Matching is case-sensitive.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "religious" => Self::Religious,
            "observance" => Self::Observance,
            "regional" => Self::Regional,
            _ => Self::National,
        }
    }

    /// The wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::Religious => "religious",
            Self::Observance => "observance",
            Self::Regional => "regional",
        }
    }
}

impl From<String> for HolidayType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl fmt::Display for HolidayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single public holiday.
///
/// Two holidays are equal when `name`, `date` and `kind` match; the
/// localized descriptions are not part of the identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "WireHoliday", into = "WireHoliday")]
pub struct Holiday {
    /// Display name. Not unique across years or countries.
    pub name: String,
    /// Calendar date of the holiday.
    pub date: NaiveDate,
    /// Holiday category.
    pub kind: HolidayType,
    /// Localized descriptions keyed by language tag (e.g. "en", "ko").
    pub descriptions: BTreeMap<String, String>,
}

impl Holiday {
    /// Create a holiday without descriptions.
    pub fn new(name: impl Into<String>, date: NaiveDate, kind: HolidayType) -> Self {
        Self {
            name: name.into(),
            date,
            kind,
            descriptions: BTreeMap::new(),
        }
    }

    /// Add a localized description.
    pub fn with_description(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions.insert(lang.into(), text.into());
        self
    }

    /// Description in `lang`.
    ///
    /// Falls back to English, then to the first available language (in tag
    /// order), then to `None`.
    pub fn description(&self, lang: &str) -> Option<&str> {
        self.descriptions
            .get(lang)
            .or_else(|| self.descriptions.get(FALLBACK_LANGUAGE))
            .or_else(|| self.descriptions.values().next())
            .map(String::as_str)
    }

    /// Calendar year of the holiday.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Whether the holiday falls on `date`.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

impl PartialEq for Holiday {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.date == other.date && self.kind == other.kind
    }
}

impl Eq for Holiday {}

impl Hash for Holiday {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.date.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.date, self.kind)
    }
}

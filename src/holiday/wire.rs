//! JSON wire format for holidays.
//!
//! The same shape is served by the refresh endpoint, shipped in the
//! embedded dataset and written into cache entries:
//!
//! ```json
//! {"holidays": [{"name": "...", "date": "2024-01-01", "type": "national",
//!                "description": {"en": "...", "ko": "..."}}]}
//! ```
//!
//! `description` may also be a plain string, read as the English entry.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::types::{Holiday, HolidayType, FALLBACK_LANGUAGE};

/// Body of a holiday payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidaysPayload {
    /// Holidays in payload order.
    pub holidays: Vec<Holiday>,
}

/// A holiday as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireHoliday {
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type", default, deserialize_with = "lenient_tag")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<WireDescription>,
}

/// Any JSON value is accepted as a type tag; only strings are kept.
fn lenient_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(tag) => Ok(Some(tag)),
        _ => Ok(None),
    }
}

/// Either a localized map or a legacy single string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireDescription {
    Localized(BTreeMap<String, String>),
    Text(String),
}

impl WireDescription {
    /// Normalize to the language-tag map.
    pub fn into_map(self) -> BTreeMap<String, String> {
        match self {
            Self::Localized(map) => map,
            Self::Text(text) => BTreeMap::from([(FALLBACK_LANGUAGE.to_string(), text)]),
        }
    }
}

impl From<WireHoliday> for Holiday {
    fn from(wire: WireHoliday) -> Self {
        Self {
            name: wire.name,
            date: wire.date,
            kind: wire
                .kind
                .as_deref()
                .map(HolidayType::from_tag)
                .unwrap_or_default(),
            descriptions: wire
                .description
                .map(WireDescription::into_map)
                .unwrap_or_default(),
        }
    }
}

impl From<Holiday> for WireHoliday {
    fn from(holiday: Holiday) -> Self {
        let description = if holiday.descriptions.is_empty() {
            None
        } else {
            Some(WireDescription::Localized(holiday.descriptions))
        };

        Self {
            name: holiday.name,
            date: holiday.date,
            kind: Some(holiday.kind.as_str().to_string()),
            description,
        }
    }
}

/// Decode a `{"holidays": [...]}` body.
pub fn decode_payload(json: &str) -> serde_json::Result<Vec<Holiday>> {
    let payload: HolidaysPayload = serde_json::from_str(json)?;
    Ok(payload.holidays)
}

/// Encode holidays as a `{"holidays": [...]}` body.
pub fn encode_payload(holidays: &[Holiday]) -> serde_json::Result<String> {
    serde_json::to_string(&HolidaysPayload {
        holidays: holidays.to_vec(),
    })
}

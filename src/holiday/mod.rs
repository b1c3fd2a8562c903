//! Holiday records and their JSON wire format.

pub mod types;
pub mod wire;

pub use types::{Holiday, HolidayType, FALLBACK_LANGUAGE};
pub use wire::{decode_payload, encode_payload, HolidaysPayload, WireDescription, WireHoliday};

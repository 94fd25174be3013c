use serde::Deserialize;

use crate::modules::run_entries::core::duration::RawReading;

/// Body of a create or update request. Every field may be absent so that
/// validation can report what is missing instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_hour: Option<RawReading>,
    #[serde(default)]
    pub start_minute: Option<RawReading>,
    #[serde(default)]
    pub end_hour: Option<RawReading>,
    #[serde(default)]
    pub end_minute: Option<RawReading>,
    #[serde(default)]
    pub closed: Option<bool>,
}

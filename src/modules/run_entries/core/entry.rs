use serde::{Deserialize, Serialize};

use crate::modules::run_entries::core::duration::RunDuration;

/// One stored day of generator activity.
///
/// Readings and derived fields are optional because documents written by
/// older schema versions may lack them; the oldest ones carry `start_time`
/// and `end_time` clock strings instead of meter readings. Entries written
/// by this service always carry readings and derived fields and never the
/// clock strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<i64>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// The mutable part of an entry, as produced by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub date: String,
    pub start_hour: i64,
    pub start_minute: i64,
    pub end_hour: i64,
    pub end_minute: i64,
    pub diff_hours: i64,
    pub diff_minutes: i64,
    pub total_minutes: i64,
    pub closed: bool,
}

impl EntryFields {
    pub fn running(date: String, readings: [i64; 4], duration: RunDuration) -> Self {
        let [start_hour, start_minute, end_hour, end_minute] = readings;
        Self {
            date,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            diff_hours: duration.hours,
            diff_minutes: duration.minutes,
            total_minutes: duration.total_minutes,
            closed: false,
        }
    }

    pub fn closed(date: String, readings: [i64; 4]) -> Self {
        let [start_hour, start_minute, end_hour, end_minute] = readings;
        Self {
            date,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            diff_hours: 0,
            diff_minutes: 0,
            total_minutes: 0,
            closed: true,
        }
    }
}

impl TimeEntry {
    pub fn new(id: impl Into<String>, fields: EntryFields, now: i64) -> Self {
        let mut entry = Self {
            id: id.into(),
            date: String::new(),
            start_hour: None,
            start_minute: None,
            end_hour: None,
            end_minute: None,
            start_time: None,
            end_time: None,
            diff_hours: None,
            diff_minutes: None,
            total_minutes: None,
            closed: false,
            created_at: now,
            updated_at: now,
        };
        entry.apply(fields, now);
        entry
    }

    /// Overwrites every mutable field. Identity and `created_at` are kept.
    pub fn apply(&mut self, fields: EntryFields, now: i64) {
        self.date = fields.date;
        self.start_hour = Some(fields.start_hour);
        self.start_minute = Some(fields.start_minute);
        self.end_hour = Some(fields.end_hour);
        self.end_minute = Some(fields.end_minute);
        self.start_time = None;
        self.end_time = None;
        self.diff_hours = Some(fields.diff_hours);
        self.diff_minutes = Some(fields.diff_minutes);
        self.total_minutes = Some(fields.total_minutes);
        self.closed = fields.closed;
        self.updated_at = now;
    }

    pub fn meter_readings(&self) -> Option<[i64; 4]> {
        Some([
            self.start_hour?,
            self.start_minute?,
            self.end_hour?,
            self.end_minute?,
        ])
    }
}

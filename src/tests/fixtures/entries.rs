// Shared builders for stored entries and request bodies.
// Compiled into the crate only during tests (see the cfg(test) tree in src/lib.rs).

use crate::modules::run_entries::core::duration::{RawReading, compute_diff};
use crate::modules::run_entries::core::entry::TimeEntry;
use crate::modules::run_entries::use_cases::manage_entries::command::EntryInput;

pub struct TimeEntryBuilder {
    inner: TimeEntry,
}

impl Default for TimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeEntryBuilder {
    pub fn new() -> Self {
        Self {
            inner: TimeEntry {
                id: "te-fixed-0001".to_string(),
                date: "2025-01-05".to_string(),
                start_hour: Some(100),
                start_minute: Some(0),
                end_hour: Some(101),
                end_minute: Some(30),
                start_time: None,
                end_time: None,
                diff_hours: Some(1),
                diff_minutes: Some(30),
                total_minutes: Some(90),
                closed: false,
                created_at: 1_700_000_000_000,
                updated_at: 1_700_000_000_000,
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn date(mut self, v: impl Into<String>) -> Self {
        self.inner.date = v.into();
        self
    }

    /// Sets the readings and the derived fields they imply. Readings that do
    /// not run forward store zeroed derived fields.
    pub fn readings(
        mut self,
        start_hour: i64,
        start_minute: i64,
        end_hour: i64,
        end_minute: i64,
    ) -> Self {
        self.inner.start_hour = Some(start_hour);
        self.inner.start_minute = Some(start_minute);
        self.inner.end_hour = Some(end_hour);
        self.inner.end_minute = Some(end_minute);
        match compute_diff(start_hour, start_minute, end_hour, end_minute) {
            Ok(d) => {
                self.inner.diff_hours = Some(d.hours);
                self.inner.diff_minutes = Some(d.minutes);
                self.inner.total_minutes = Some(d.total_minutes);
            }
            Err(_) => {
                self.inner.diff_hours = Some(0);
                self.inner.diff_minutes = Some(0);
                self.inner.total_minutes = Some(0);
            }
        }
        self
    }

    /// Overrides only the derived fields.
    pub fn total_minutes(mut self, total: i64) -> Self {
        self.inner.diff_hours = Some(total / 60);
        self.inner.diff_minutes = Some(total % 60);
        self.inner.total_minutes = Some(total);
        self
    }

    /// A closed day as the service writes it.
    pub fn closed(mut self) -> Self {
        self.inner.closed = true;
        self.inner.start_hour = Some(0);
        self.inner.start_minute = Some(0);
        self.inner.end_hour = Some(0);
        self.inner.end_minute = Some(0);
        self.inner.diff_hours = Some(0);
        self.inner.diff_minutes = Some(0);
        self.inner.total_minutes = Some(0);
        self
    }

    pub fn mark_closed(mut self) -> Self {
        self.inner.closed = true;
        self
    }

    pub fn without_derived_fields(mut self) -> Self {
        self.inner.diff_hours = None;
        self.inner.diff_minutes = None;
        self.inner.total_minutes = None;
        self
    }

    /// Oldest document shape: clock strings, no readings, no derived fields.
    pub fn legacy_clock(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.inner.start_hour = None;
        self.inner.start_minute = None;
        self.inner.end_hour = None;
        self.inner.end_minute = None;
        self.inner.start_time = Some(start.into());
        self.inner.end_time = Some(end.into());
        self.without_derived_fields()
    }

    pub fn created_at(mut self, v: i64) -> Self {
        self.inner.created_at = v;
        self.inner.updated_at = v;
        self
    }

    pub fn build(self) -> TimeEntry {
        self.inner
    }
}

pub struct EntryInputBuilder {
    inner: EntryInput,
}

impl Default for EntryInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EntryInputBuilder {
    pub fn new() -> Self {
        Self {
            inner: EntryInput {
                date: Some("2025-01-05".to_string()),
                start_hour: Some(RawReading::from(100)),
                start_minute: Some(RawReading::from(0)),
                end_hour: Some(RawReading::from(101)),
                end_minute: Some(RawReading::from(30)),
                closed: None,
            },
        }
    }

    pub fn date(mut self, v: Option<&str>) -> Self {
        self.inner.date = v.map(str::to_string);
        self
    }

    pub fn readings(
        mut self,
        start_hour: i64,
        start_minute: i64,
        end_hour: i64,
        end_minute: i64,
    ) -> Self {
        self.inner.start_hour = Some(start_hour.into());
        self.inner.start_minute = Some(start_minute.into());
        self.inner.end_hour = Some(end_hour.into());
        self.inner.end_minute = Some(end_minute.into());
        self
    }

    pub fn start_minute(mut self, v: impl Into<RawReading>) -> Self {
        self.inner.start_minute = Some(v.into());
        self
    }

    pub fn without_end_minute(mut self) -> Self {
        self.inner.end_minute = None;
        self
    }

    pub fn without_readings(mut self) -> Self {
        self.inner.start_hour = None;
        self.inner.start_minute = None;
        self.inner.end_hour = None;
        self.inner.end_minute = None;
        self
    }

    pub fn closed(mut self, v: bool) -> Self {
        self.inner.closed = Some(v);
        self
    }

    pub fn build(self) -> EntryInput {
        self.inner
    }
}

#[cfg(test)]
mod entry_builders_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_entry_carries_consistent_derived_fields() {
        let entry = TimeEntryBuilder::default().build();
        let duration = compute_diff(100, 0, 101, 30).unwrap();
        assert_eq!(entry.total_minutes, Some(duration.total_minutes));
        assert_eq!(entry.diff_hours, Some(duration.hours));
        assert_eq!(entry.diff_minutes, Some(duration.minutes));
        assert!(!entry.closed);
    }

    #[rstest]
    fn legacy_clock_clears_readings_and_derived_fields() {
        let entry = TimeEntryBuilder::new().legacy_clock("08:00", "10:15").build();
        assert_eq!(entry.start_hour, None);
        assert_eq!(entry.total_minutes, None);
        assert_eq!(entry.start_time.as_deref(), Some("08:00"));
        assert_eq!(entry.end_time.as_deref(), Some("10:15"));
    }

    #[rstest]
    fn input_setters_override_defaults() {
        let input = EntryInputBuilder::new()
            .date(None)
            .without_readings()
            .closed(true)
            .build();
        assert_eq!(input.date, None);
        assert_eq!(input.start_hour, None);
        assert_eq!(input.closed, Some(true));
    }
}

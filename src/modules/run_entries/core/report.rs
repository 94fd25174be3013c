// Report model and the pure aggregation that builds it.
//
// Rows are resolved once: a closed day, a positive run duration, or no valid
// duration. Only positive durations of running days count towards month
// totals, the grand total, and the day count. Documents without derived
// duration fields are repaired here at read time; stored entries are never
// touched. Durations have no upper bound, so totals saturate at i64::MAX.

use std::collections::BTreeMap;

use chrono::Month;

use crate::modules::run_entries::core::duration::{
    RunDuration, compute_clock_diff, compute_diff,
};
use crate::modules::run_entries::core::entry::TimeEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading {
    Meter { hour: i64, minute: i64 },
    Clock(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Closed,
    Ran(RunDuration),
    NoValidDuration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub entry_id: String,
    pub date: String,
    pub start: Option<Reading>,
    pub end: Option<Reading>,
    pub status: RowStatus,
}

impl ReportRow {
    pub fn from_entry(entry: &TimeEntry) -> Self {
        let (start, end) = match entry.meter_readings() {
            Some([start_hour, start_minute, end_hour, end_minute]) => (
                Some(Reading::Meter {
                    hour: start_hour,
                    minute: start_minute,
                }),
                Some(Reading::Meter {
                    hour: end_hour,
                    minute: end_minute,
                }),
            ),
            None => (
                entry.start_time.clone().map(Reading::Clock),
                entry.end_time.clone().map(Reading::Clock),
            ),
        };
        Self {
            entry_id: entry.id.clone(),
            date: entry.date.clone(),
            start,
            end,
            status: resolve_status(entry),
        }
    }

    /// Minutes this row contributes to totals.
    pub fn counted_minutes(&self) -> Option<i64> {
        match self.status {
            RowStatus::Ran(duration) => Some(duration.total_minutes),
            RowStatus::Closed | RowStatus::NoValidDuration => None,
        }
    }
}

fn resolve_status(entry: &TimeEntry) -> RowStatus {
    if entry.closed {
        return RowStatus::Closed;
    }
    match (entry.diff_hours, entry.diff_minutes, entry.total_minutes) {
        (Some(hours), Some(minutes), Some(total_minutes)) if total_minutes > 0 => {
            RowStatus::Ran(RunDuration {
                hours,
                minutes,
                total_minutes,
            })
        }
        (Some(_), Some(_), Some(_)) => RowStatus::NoValidDuration,
        _ => repair_duration(entry),
    }
}

fn repair_duration(entry: &TimeEntry) -> RowStatus {
    let recomputed = if let Some([start_hour, start_minute, end_hour, end_minute]) =
        entry.meter_readings()
    {
        compute_diff(start_hour, start_minute, end_hour, end_minute).ok()
    } else if let (Some(start), Some(end)) = (&entry.start_time, &entry.end_time) {
        compute_clock_diff(start, end).ok()
    } else {
        None
    };
    recomputed
        .or_else(|| {
            entry
                .total_minutes
                .and_then(|total| RunDuration::from_total_minutes(total).ok())
        })
        .map(RowStatus::Ran)
        .unwrap_or(RowStatus::NoValidDuration)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_minutes: i64,
    pub day_count: usize,
    /// Hours per counted day with two decimals, `"0.00"` without days.
    pub average_hours_per_day: String,
}

impl ReportSummary {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ReportRow>) -> Self {
        let (total_minutes, day_count) = rows
            .into_iter()
            .filter_map(ReportRow::counted_minutes)
            .fold((0i64, 0usize), |(total, days), minutes| {
                (total.saturating_add(minutes), days + 1)
            });
        let average_hours_per_day = if day_count > 0 {
            format!("{:.2}", total_minutes as f64 / day_count as f64 / 60.0)
        } else {
            "0.00".to_string()
        };
        Self {
            total_minutes,
            day_count,
            average_hours_per_day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    /// `YYYY-MM`
    pub key: String,
    /// e.g. `January 2025`
    pub label: String,
    pub total_minutes: i64,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportModel {
    pub months: Vec<MonthGroup>,
    pub summary: ReportSummary,
    /// Entries left out because their date has no usable year and month.
    pub skipped_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatReport {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

/// Year and month of a `YYYY-MM-DD` date string. The day part is not checked.
pub fn year_month(date: &str) -> Option<(i32, Month)> {
    let mut parts = date.trim().split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = Month::try_from(parts.next()?.parse::<u8>().ok()?).ok()?;
    if year < 0 {
        return None;
    }
    Some((year, month))
}

/// Groups entries by calendar month, oldest month first. Entries keep their
/// input order inside a month, so callers pass them sorted by date.
pub fn build_monthly_report(entries: &[TimeEntry]) -> ReportModel {
    let mut groups: BTreeMap<(i32, u32), MonthGroup> = BTreeMap::new();
    let mut skipped_entries = 0;

    for entry in entries {
        let Some((year, month)) = year_month(&entry.date) else {
            skipped_entries += 1;
            continue;
        };
        let number = month.number_from_month();
        let group = groups.entry((year, number)).or_insert_with(|| MonthGroup {
            key: format!("{year:04}-{number:02}"),
            label: format!("{} {year}", month.name()),
            total_minutes: 0,
            rows: Vec::new(),
        });
        let row = ReportRow::from_entry(entry);
        group.total_minutes = group
            .total_minutes
            .saturating_add(row.counted_minutes().unwrap_or(0));
        group.rows.push(row);
    }

    let months: Vec<MonthGroup> = groups.into_values().collect();
    let summary = ReportSummary::from_rows(months.iter().flat_map(|m| m.rows.iter()));
    ReportModel {
        months,
        summary,
        skipped_entries,
    }
}

pub fn build_flat_report(entries: &[TimeEntry]) -> FlatReport {
    let rows: Vec<ReportRow> = entries.iter().map(ReportRow::from_entry).collect();
    let summary = ReportSummary::from_rows(&rows);
    FlatReport { rows, summary }
}

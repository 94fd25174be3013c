use crate::modules::run_entries::core::duration::{DurationError, RawReading, compute_diff};
use crate::modules::run_entries::core::entry::EntryFields;
use crate::modules::run_entries::use_cases::manage_entries::command::EntryInput;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum DecideError {
    #[error("date is required")]
    MissingDate,

    #[error("{0} is required")]
    MissingReading(&'static str),

    #[error("{0} must be a non-negative whole number")]
    InvalidReading(&'static str),

    #[error("{0} is too large")]
    ReadingTooLarge(&'static str),

    #[error("readings are too large to compute a duration")]
    DurationOverflow,

    #[error("end must exceed start")]
    NotForward,
}

const READING_FIELDS: [&str; 4] = ["startHour", "startMinute", "endHour", "endMinute"];

/// Validates a create or update request and computes the stored fields.
///
/// A closed day skips duration validation: readings that are missing or not
/// numeric become 0 and the duration is zero.
pub fn decide_entry(input: EntryInput) -> Result<EntryFields, DecideError> {
    let date = match input.date {
        Some(date) if !date.trim().is_empty() => date,
        _ => return Err(DecideError::MissingDate),
    };
    let raw = [
        input.start_hour,
        input.start_minute,
        input.end_hour,
        input.end_minute,
    ];

    if input.closed.unwrap_or(false) {
        let readings = raw.map(|r| r.and_then(|r| r.coerce().ok()).unwrap_or(0));
        return Ok(EntryFields::closed(date, readings));
    }

    let readings = coerce_all(&raw)?;
    let [start_hour, start_minute, end_hour, end_minute] = readings;
    let duration =
        compute_diff(start_hour, start_minute, end_hour, end_minute).map_err(|e| match e {
            DurationError::NotForward => DecideError::NotForward,
            DurationError::OutOfRange => DecideError::DurationOverflow,
            DurationError::InvalidReading => DecideError::InvalidReading("readings"),
        })?;
    Ok(EntryFields::running(date, readings, duration))
}

fn coerce_all(raw: &[Option<RawReading>; 4]) -> Result<[i64; 4], DecideError> {
    let mut readings = [0i64; 4];
    for (i, field) in READING_FIELDS.into_iter().enumerate() {
        let value = raw[i].as_ref().ok_or(DecideError::MissingReading(field))?;
        readings[i] = value.coerce().map_err(|e| match e {
            DurationError::OutOfRange => DecideError::ReadingTooLarge(field),
            _ => DecideError::InvalidReading(field),
        })?;
    }
    Ok(readings)
}

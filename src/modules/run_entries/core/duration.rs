use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum DurationError {
    #[error("reading is not a non-negative whole number")]
    InvalidReading,

    #[error("reading is too large")]
    OutOfRange,

    #[error("end must exceed start")]
    NotForward,
}

/// Elapsed run time between two readings. `total_minutes` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDuration {
    pub hours: i64,
    pub minutes: i64,
    pub total_minutes: i64,
}

impl RunDuration {
    pub fn from_total_minutes(total_minutes: i64) -> Result<Self, DurationError> {
        if total_minutes <= 0 {
            return Err(DurationError::NotForward);
        }
        Ok(Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
            total_minutes,
        })
    }
}

/// A reading as it arrives over the wire: a JSON number or a numeric string.
/// Integers are kept exact; only non-integral JSON numbers land in `Number`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawReading {
    Int(i64),
    Number(f64),
    Text(String),
}

impl RawReading {
    pub fn coerce(&self) -> Result<i64, DurationError> {
        match self {
            RawReading::Int(n) if *n < 0 => Err(DurationError::InvalidReading),
            RawReading::Int(n) => Ok(*n),
            RawReading::Number(n) => coerce_float(*n),
            RawReading::Text(s) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(n) if n < 0 => Err(DurationError::InvalidReading),
                    Ok(n) => Ok(n),
                    Err(_) => coerce_float(s.parse().map_err(|_| DurationError::InvalidReading)?),
                }
            }
        }
    }
}

// 2^63 is the first float past i64::MAX.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn coerce_float(value: f64) -> Result<i64, DurationError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(DurationError::InvalidReading);
    }
    if value >= I64_LIMIT {
        return Err(DurationError::OutOfRange);
    }
    Ok(value as i64)
}

impl From<i64> for RawReading {
    fn from(value: i64) -> Self {
        RawReading::Int(value)
    }
}

impl From<&str> for RawReading {
    fn from(value: &str) -> Self {
        RawReading::Text(value.to_string())
    }
}

pub fn compute_diff(
    start_hour: i64,
    start_minute: i64,
    end_hour: i64,
    end_minute: i64,
) -> Result<RunDuration, DurationError> {
    if [start_hour, start_minute, end_hour, end_minute]
        .iter()
        .any(|v| *v < 0)
    {
        return Err(DurationError::InvalidReading);
    }
    let start = start_hour
        .checked_mul(60)
        .and_then(|m| m.checked_add(start_minute))
        .ok_or(DurationError::OutOfRange)?;
    let end = end_hour
        .checked_mul(60)
        .and_then(|m| m.checked_add(end_minute))
        .ok_or(DurationError::OutOfRange)?;
    RunDuration::from_total_minutes(end - start)
}

pub fn compute_raw_diff(
    start_hour: &RawReading,
    start_minute: &RawReading,
    end_hour: &RawReading,
    end_minute: &RawReading,
) -> Result<RunDuration, DurationError> {
    compute_diff(
        start_hour.coerce()?,
        start_minute.coerce()?,
        end_hour.coerce()?,
        end_minute.coerce()?,
    )
}

/// Parses a `HH:MM` clock string. Hours are not capped at 23.
pub fn parse_clock(value: &str) -> Result<(i64, i64), DurationError> {
    let (hours, minutes) = value
        .trim()
        .split_once(':')
        .ok_or(DurationError::InvalidReading)?;
    let hours = RawReading::Text(hours.to_string()).coerce()?;
    let minutes = RawReading::Text(minutes.to_string()).coerce()?;
    Ok((hours, minutes))
}

pub fn compute_clock_diff(start: &str, end: &str) -> Result<RunDuration, DurationError> {
    let (start_hour, start_minute) = parse_clock(start)?;
    let (end_hour, end_minute) = parse_clock(end)?;
    compute_diff(start_hour, start_minute, end_hour, end_minute)
}

use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{OnTask, SessionMode};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn to_i64(value: usize) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

pub fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} contains out-of-range value {value}"))
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_optional_datetime(
    value: Option<String>,
    field: &str,
) -> Result<Option<DateTime<Utc>>> {
    match value {
        Some(raw) => parse_datetime(&raw, field).map(Some),
        None => Ok(None),
    }
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .with_context(|| format!("failed to parse day '{value}'"))
}

pub fn parse_mode(value: &str) -> Result<SessionMode> {
    match value {
        "timer" => Ok(SessionMode::Timer),
        "stopwatch" => Ok(SessionMode::Stopwatch),
        other => Err(anyhow!("unknown session mode {other}")),
    }
}

pub fn parse_on_task(value: &str) -> Result<OnTask> {
    match value {
        "yes" => Ok(OnTask::Yes),
        "somewhat" => Ok(OnTask::Somewhat),
        "no" => Ok(OnTask::No),
        "unsure" => Ok(OnTask::Unsure),
        other => Err(anyhow!("unknown on-task value {other}")),
    }
}

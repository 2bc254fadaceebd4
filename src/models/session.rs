//! Study-session data models.
//!
//! `NewStudySession` is the raw submission as it arrives from the ingestion
//! layer. `NewStudySession::normalize` turns it into `SessionInput`, the
//! cleaned-up fields the scoring engine works with, and `StudySession` is the
//! persisted record carrying the computed focus score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const UNSPECIFIED_GOAL: &str = "unspecified";
pub const DEFAULT_SELF_RATING: u8 = 3;
pub const MAX_SELF_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Timer,
    Stopwatch,
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::Timer => "timer",
            SessionMode::Stopwatch => "stopwatch",
        }
    }

    /// Lenient parse used at the ingestion boundary: unknown modes are
    /// recorded as stopwatch sessions.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "timer" => SessionMode::Timer,
            _ => SessionMode::Stopwatch,
        }
    }
}

impl Default for SessionMode {
    fn default() -> Self {
        SessionMode::Stopwatch
    }
}

/// Self-reported on-task category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OnTask {
    Yes,
    Somewhat,
    No,
    /// Missing or unrecognized answer.
    Unsure,
}

impl OnTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnTask::Yes => "yes",
            OnTask::Somewhat => "somewhat",
            OnTask::No => "no",
            OnTask::Unsure => "unsure",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "yes" | "y" | "on_task" => OnTask::Yes,
            "somewhat" => OnTask::Somewhat,
            "no" | "n" => OnTask::No,
            _ => OnTask::Unsure,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakInterval {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub minutes: u32,
}

/// Raw session submission. Numeric fields are signed on purpose so that
/// out-of-range values can be clamped or rejected here instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewStudySession {
    pub mode: String,
    pub goal: String,
    pub planned_min: i64,
    pub actual_min: i64,
    pub pause_count: i64,
    pub self_rating: i64,
    pub self_on_task: String,
    pub ended_at: Option<DateTime<Utc>>,
    pub breaks: Vec<BreakInterval>,
}

/// Validated, normalized session fields ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInput {
    pub mode: SessionMode,
    pub goal: String,
    pub planned_min: Option<u32>,
    pub actual_min: u32,
    pub pause_count: u32,
    pub self_rating: u8,
    pub self_on_task: OnTask,
    pub ended_at: Option<DateTime<Utc>>,
    pub breaks: Vec<BreakInterval>,
}

impl NewStudySession {
    pub fn normalize(self) -> Result<SessionInput, EngineError> {
        if self.actual_min <= 0 {
            return Err(EngineError::InvalidSession(
                "actual_min must be greater than 0".into(),
            ));
        }
        let actual_min = u32::try_from(self.actual_min).map_err(|_| {
            EngineError::InvalidSession(format!("actual_min {} is out of range", self.actual_min))
        })?;

        let planned_min = if self.planned_min > 0 {
            Some(u32::try_from(self.planned_min).unwrap_or(u32::MAX))
        } else {
            None
        };

        let self_rating = if self.self_rating <= 0 {
            DEFAULT_SELF_RATING
        } else {
            self.self_rating.min(MAX_SELF_RATING as i64) as u8
        };

        Ok(SessionInput {
            mode: SessionMode::parse_lenient(&self.mode),
            goal: normalize_goal(&self.goal),
            planned_min,
            actual_min,
            pause_count: u32::try_from(self.pause_count.max(0)).unwrap_or(u32::MAX),
            self_rating,
            self_on_task: OnTask::parse(&self.self_on_task),
            ended_at: self.ended_at,
            breaks: self.breaks,
        })
    }
}

/// Trim and lowercase a goal label; blank labels become `"unspecified"`.
pub fn normalize_goal(goal: &str) -> String {
    let trimmed = goal.trim();
    if trimmed.is_empty() {
        UNSPECIFIED_GOAL.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub user_id: String,
    pub mode: SessionMode,
    pub goal: String,
    pub planned_min: Option<u32>,
    pub actual_min: u32,
    pub pause_count: u32,
    pub self_rating: u8,
    pub self_on_task: OnTask,
    pub focus_score: u8,
    pub breaks: Vec<BreakInterval>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

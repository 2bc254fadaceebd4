use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Per-user daily aggregates produced by an external rollup job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRollup {
    pub total_study_hours: f64,
    /// Breaks per study hour.
    pub break_frequency: f64,
    /// 0-100, lower means more volatile focus.
    pub focus_stability: f64,
}

impl DailyRollup {
    pub fn validate(&self) -> Result<(), EngineError> {
        let fields = [
            ("total_study_hours", self.total_study_hours),
            ("break_frequency", self.break_frequency),
            ("focus_stability", self.focus_stability),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(EngineError::InvalidRollup(format!("{name} must be finite")));
            }
            if value < 0.0 {
                return Err(EngineError::InvalidRollup(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        if self.focus_stability > 100.0 {
            return Err(EngineError::InvalidRollup(format!(
                "focus_stability must be within 0-100, got {}",
                self.focus_stability
            )));
        }
        Ok(())
    }
}

/// One fatigue record per (user, calendar day).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FatigueScore {
    pub id: String,
    pub user_id: String,
    pub day: NaiveDate,
    pub total_study_hours: f64,
    pub break_frequency: f64,
    pub focus_stability: f64,
    pub fatigue_index: f64,
    pub burnout_probability: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

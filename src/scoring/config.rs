use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Longest accepted consistency lookback, in days.
pub const MAX_LOOKBACK_DAYS: i64 = 3650;

/// Weights for the per-session focus score. Each component is already
/// normalized to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusWeights {
    pub completion: f64,
    pub stability: f64,
    pub self_report: f64,
    pub consistency: f64,
}

impl Default for FocusWeights {
    fn default() -> Self {
        Self {
            completion: 0.4,
            stability: 0.2,
            self_report: 0.2,
            consistency: 0.2,
        }
    }
}

/// Weights for the daily fatigue index.
///
/// The index is `study_hours * hours - break_frequency * breaks
/// + focus_volatility * volatility / 100`, scaled by `index_scale`.
/// `break_frequency` defaults to a negative weight, so the subtraction adds
/// to fatigue: more breaks per hour raise the index. Kept as-is until the
/// intended sign is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FatigueWeights {
    pub study_hours: f64,
    pub break_frequency: f64,
    pub focus_volatility: f64,
    pub index_scale: f64,
}

impl Default for FatigueWeights {
    fn default() -> Self {
        Self {
            study_hours: 0.4,
            break_frequency: -0.3,
            focus_volatility: 0.3,
            index_scale: 25.0,
        }
    }
}

/// Lookback settings for historical consistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsistencyConfig {
    /// Most recent sessions to inspect.
    pub history_limit: usize,
    /// Only sessions started within this many days count.
    pub lookback_days: i64,
    /// Distinct active days that earn a full score.
    pub target_active_days: usize,
    /// Score when the user has no sessions or history cannot be read.
    pub no_history_score: f64,
    /// Score when sessions exist but none fall inside the lookback window.
    pub stale_history_score: f64,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            history_limit: 20,
            lookback_days: 14,
            target_active_days: 10,
            no_history_score: 0.3,
            stale_history_score: 0.4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    pub focus: FocusWeights,
    pub fatigue: FatigueWeights,
    pub consistency: ConsistencyConfig,
}

fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        bail!("{name} must be a finite number, got {value}");
    }
    Ok(())
}

fn ensure_unit(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        bail!("{name} must be within [0, 1], got {value}");
    }
    Ok(())
}

impl ScoringConfig {
    /// Reject settings the scorers cannot work with.
    pub fn validate(&self) -> Result<()> {
        let focus = &self.focus;
        for (name, value) in [
            ("focus.completion", focus.completion),
            ("focus.stability", focus.stability),
            ("focus.selfReport", focus.self_report),
            ("focus.consistency", focus.consistency),
        ] {
            ensure_finite(name, value)?;
        }

        let fatigue = &self.fatigue;
        ensure_finite("fatigue.studyHours", fatigue.study_hours)?;
        ensure_finite("fatigue.breakFrequency", fatigue.break_frequency)?;
        ensure_finite("fatigue.focusVolatility", fatigue.focus_volatility)?;
        ensure_finite("fatigue.indexScale", fatigue.index_scale)?;
        if fatigue.index_scale < 0.0 {
            bail!("fatigue.indexScale must not be negative, got {}", fatigue.index_scale);
        }

        let consistency = &self.consistency;
        if !(0..=MAX_LOOKBACK_DAYS).contains(&consistency.lookback_days) {
            bail!(
                "consistency.lookbackDays must be within 0..={MAX_LOOKBACK_DAYS}, got {}",
                consistency.lookback_days
            );
        }
        if consistency.history_limit == 0 {
            bail!("consistency.historyLimit must be at least 1");
        }
        ensure_unit("consistency.noHistoryScore", consistency.no_history_score)?;
        ensure_unit("consistency.staleHistoryScore", consistency.stale_history_score)?;
        Ok(())
    }
}

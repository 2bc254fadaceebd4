use serde::{Deserialize, Serialize};

use crate::models::DailyRollup;
use crate::scoring::config::FatigueWeights;

const MAX_INDEX: f64 = 100.0;

/// Logistic curve parameters for burnout probability.
const BURNOUT_STEEPNESS: f64 = 0.1;
const BURNOUT_MIDPOINT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueAssessment {
    pub fatigue_index: f64,
    pub burnout_probability: f64,
}

/// Composite fatigue index in [0, 100].
pub fn fatigue_index(rollup: &DailyRollup, weights: &FatigueWeights) -> f64 {
    let volatility = (100.0 - rollup.focus_stability).max(0.0);
    let raw = weights.study_hours * rollup.total_study_hours
        - weights.break_frequency * rollup.break_frequency
        + weights.focus_volatility * volatility / 100.0;

    let scaled = raw * weights.index_scale;
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(0.0, MAX_INDEX)
}

/// Logistic transform of the fatigue index, rounded to one decimal.
pub fn burnout_probability(fatigue_index: f64) -> f64 {
    let p = 100.0 / (1.0 + (-BURNOUT_STEEPNESS * (fatigue_index - BURNOUT_MIDPOINT)).exp());
    (p * 10.0).round() / 10.0
}

pub fn assess(rollup: &DailyRollup, weights: &FatigueWeights) -> FatigueAssessment {
    let fatigue_index = fatigue_index(rollup, weights);
    FatigueAssessment {
        fatigue_index,
        burnout_probability: burnout_probability(fatigue_index),
    }
}

use serde::{Deserialize, Serialize};

use crate::models::SessionInput;
use crate::scoring::{
    baseline::baseline_minutes,
    components::{completion_ratio, self_report_component, stability_from_pauses},
    config::FocusWeights,
};

/// The four normalized inputs of a focus score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusComponents {
    pub completion: f64,
    pub stability: f64,
    pub self_report: f64,
    pub consistency: f64,
}

impl FocusComponents {
    /// Evaluate the session-local components; consistency comes from the
    /// user's history and is supplied by the caller.
    pub fn evaluate(input: &SessionInput, consistency: f64) -> Self {
        let baseline = baseline_minutes(&input.goal, input.mode);
        Self {
            completion: completion_ratio(input.mode, input.planned_min, input.actual_min, baseline),
            stability: stability_from_pauses(input.pause_count),
            self_report: self_report_component(input.self_rating, input.self_on_task),
            consistency,
        }
    }
}

/// Weighted blend of the components as an integer in [0, 100].
pub fn focus_score(components: &FocusComponents, weights: &FocusWeights) -> u8 {
    let unit = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };

    let blended = weights.completion * unit(components.completion)
        + weights.stability * unit(components.stability)
        + weights.self_report * unit(components.self_report)
        + weights.consistency * unit(components.consistency);

    (unit(blended) * 100.0).round() as u8
}

/// Score a normalized session in one call.
pub fn score_session(input: &SessionInput, consistency: f64, weights: &FocusWeights) -> u8 {
    focus_score(&FocusComponents::evaluate(input, consistency), weights)
}

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::FatigueScore;

/// Highest-risk users by their most recent daily score.
///
/// Keeps the latest record per user, orders by burnout probability
/// descending (ties by user id ascending) and truncates to `limit`.
pub fn rank_highest_risk(mut scores: Vec<FatigueScore>, limit: usize) -> Vec<FatigueScore> {
    scores.sort_by(|a, b| b.day.cmp(&a.day).then_with(|| a.user_id.cmp(&b.user_id)));

    let mut seen = HashSet::new();
    let mut latest: Vec<FatigueScore> = scores
        .into_iter()
        .filter(|score| seen.insert(score.user_id.clone()))
        .collect();

    latest.sort_by(|a, b| {
        b.burnout_probability
            .partial_cmp(&a.burnout_probability)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    latest.truncate(limit);
    latest
}

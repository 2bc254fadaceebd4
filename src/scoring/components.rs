use crate::models::{OnTask, SessionMode};

/// Overshooting the target by more than this ratio earns no extra credit.
const COMPLETION_CAP: f64 = 1.2;

/// Actual vs. target duration, normalized into [0, 1].
///
/// Timer sessions with a plan are measured against the plan, everything else
/// against the goal baseline. A non-positive target degrades to the actual
/// duration (ratio 1).
pub fn completion_ratio(
    mode: SessionMode,
    planned_min: Option<u32>,
    actual_min: u32,
    baseline_min: u32,
) -> f64 {
    if actual_min == 0 {
        return 0.0;
    }

    let mut target = match (mode, planned_min) {
        (SessionMode::Timer, Some(planned)) if planned > 0 => planned as f64,
        _ => baseline_min as f64,
    };
    if target <= 0.0 {
        target = actual_min as f64;
    }

    let ratio = (actual_min as f64 / target).clamp(0.0, COMPLETION_CAP);
    ratio / COMPLETION_CAP
}

/// Step score for interruptions: fewer pauses, steadier session.
pub fn stability_from_pauses(pause_count: u32) -> f64 {
    match pause_count {
        0 => 1.0,
        1..=2 => 0.8,
        3..=4 => 0.5,
        _ => 0.3,
    }
}

/// Self-rating scaled to [0, 1] and discounted by the on-task answer.
pub fn self_report_component(self_rating: u8, on_task: OnTask) -> f64 {
    let base = self_rating.clamp(1, 5) as f64 / 5.0;
    let multiplier = match on_task {
        OnTask::Yes => 1.0,
        OnTask::Somewhat => 0.7,
        OnTask::No => 0.4,
        OnTask::Unsure => 0.8,
    };
    (base * multiplier).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn completion_caps_at_one_point_two() {
        let r = completion_ratio(SessionMode::Timer, Some(30), 36, 45);
        assert_eq!(r, 1.0);
        let over = completion_ratio(SessionMode::Timer, Some(30), 90, 45);
        assert_eq!(over, 1.0);
    }

    #[test]
    fn completion_zero_duration_is_zero() {
        assert_eq!(completion_ratio(SessionMode::Timer, Some(30), 0, 45), 0.0);
    }

    #[test]
    fn completion_uses_baseline_without_plan() {
        // stopwatch ignores the plan entirely
        let r = completion_ratio(SessionMode::Stopwatch, Some(10), 15, 30);
        assert!((r - (0.5 / 1.2)).abs() < EPS);
        let r = completion_ratio(SessionMode::Timer, None, 30, 30);
        assert!((r - (1.0 / 1.2)).abs() < EPS);
    }

    #[test]
    fn completion_degenerate_target_uses_actual() {
        let r = completion_ratio(SessionMode::Stopwatch, None, 17, 0);
        assert!((r - (1.0 / 1.2)).abs() < EPS);
    }

    #[test]
    fn completion_is_monotonic() {
        let mut last = 0.0;
        for actual in 0..=60 {
            let r = completion_ratio(SessionMode::Timer, Some(30), actual, 45);
            assert!(r >= last, "ratio dropped at {actual}");
            assert!((0.0..=1.0).contains(&r));
            last = r;
        }
    }

    #[test]
    fn stability_steps_never_increase() {
        let allowed = [1.0, 0.8, 0.5, 0.3];
        let mut last = f64::MAX;
        for pauses in 0..50 {
            let s = stability_from_pauses(pauses);
            assert!(allowed.contains(&s));
            assert!(s <= last);
            last = s;
        }
        assert_eq!(stability_from_pauses(2), 0.8);
        assert_eq!(stability_from_pauses(3), 0.5);
        assert_eq!(stability_from_pauses(5), 0.3);
    }

    #[test]
    fn self_report_extremes() {
        assert_eq!(self_report_component(5, OnTask::Yes), 1.0);
        assert!((self_report_component(1, OnTask::No) - 0.08).abs() < EPS);
    }

    #[test]
    fn self_report_multipliers() {
        assert!((self_report_component(5, OnTask::Somewhat) - 0.7).abs() < EPS);
        assert!((self_report_component(5, OnTask::Unsure) - 0.8).abs() < EPS);
        // out-of-range ratings are clamped
        assert_eq!(self_report_component(9, OnTask::Yes), 1.0);
        assert!((self_report_component(0, OnTask::Yes) - 0.2).abs() < EPS);
    }
}

use crate::models::SessionMode;

/// Session length used when a goal label matches nothing in the catalog.
pub const DEFAULT_BASELINE_MIN: u32 = 25;

/// Expected session length in minutes for a goal label.
///
/// Matching ignores case and surrounding whitespace, and treats underscores
/// as spaces ("problem_solving" == "Problem Solving"). The mode is accepted
/// for future per-mode defaults but does not change the result today.
pub fn baseline_minutes(goal: &str, _mode: SessionMode) -> u32 {
    let key = goal
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match key.as_str() {
        "coding" | "problem solving" => 45,
        "studying" | "reading" | "research" | "revision" => 30,
        "writing" | "content creation" | "video editing" => 40,
        "office work" | "admin" => 20,
        _ => DEFAULT_BASELINE_MIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entries() {
        let timer = SessionMode::Timer;
        assert_eq!(baseline_minutes("coding", timer), 45);
        assert_eq!(baseline_minutes("problem solving", timer), 45);
        assert_eq!(baseline_minutes("revision", timer), 30);
        assert_eq!(baseline_minutes("research", timer), 30);
        assert_eq!(baseline_minutes("video editing", timer), 40);
        assert_eq!(baseline_minutes("admin", timer), 20);
    }

    #[test]
    fn underscores_case_and_spacing_are_equivalent() {
        let mode = SessionMode::Stopwatch;
        assert_eq!(baseline_minutes("Problem_Solving", mode), 45);
        assert_eq!(baseline_minutes("  CONTENT   creation ", mode), 40);
        assert_eq!(baseline_minutes("office_work", mode), 20);
    }

    #[test]
    fn unknown_goal_falls_back_for_both_modes() {
        assert_eq!(baseline_minutes("unspecified", SessionMode::Timer), DEFAULT_BASELINE_MIN);
        assert_eq!(baseline_minutes("gardening", SessionMode::Stopwatch), DEFAULT_BASELINE_MIN);
        assert_eq!(baseline_minutes("", SessionMode::Stopwatch), DEFAULT_BASELINE_MIN);
    }
}

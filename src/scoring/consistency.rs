use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::scoring::config::ConsistencyConfig;
use crate::store::SessionHistory;
use crate::log_warn;

const ENABLE_LOGS: bool = true;

/// Reward regular use: distinct active days among the user's most recent
/// sessions, within the lookback window ending at `now`.
///
/// A failed history read is absorbed and scored like an empty history so a
/// store hiccup never blocks session creation.
pub async fn historical_consistency<H>(
    history: &H,
    user_id: &str,
    now: DateTime<Utc>,
    config: &ConsistencyConfig,
) -> f64
where
    H: SessionHistory + ?Sized,
{
    let sessions = match history.recent_sessions(user_id, config.history_limit).await {
        Ok(sessions) => sessions,
        Err(err) => {
            log_warn!("History lookup failed for user {user_id}, using default consistency: {err:#}");
            return config.no_history_score;
        }
    };

    if sessions.is_empty() {
        return config.no_history_score;
    }

    let cutoff = match Duration::try_days(config.lookback_days)
        .and_then(|window| now.checked_sub_signed(window))
    {
        Some(cutoff) => cutoff,
        None => {
            log_warn!(
                "Lookback of {} days is out of range, using default consistency",
                config.lookback_days
            );
            return config.no_history_score;
        }
    };
    let active_days: HashSet<_> = sessions
        .iter()
        .filter(|s| s.started_at >= cutoff)
        .map(|s| s.started_at.date_naive())
        .collect();

    if active_days.is_empty() {
        return config.stale_history_score;
    }

    let target = config.target_active_days.max(1) as f64;
    (active_days.len() as f64 / target).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{session_started_at, FakeStore};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn no_sessions_scores_default() {
        let store = FakeStore::default();
        let score = historical_consistency(&store, "u1", now(), &ConsistencyConfig::default()).await;
        assert_eq!(score, 0.3);
    }

    #[tokio::test]
    async fn read_failure_is_absorbed() {
        let store = FakeStore::failing();
        let score = historical_consistency(&store, "u1", now(), &ConsistencyConfig::default()).await;
        assert_eq!(score, 0.3);
    }

    #[tokio::test]
    async fn out_of_range_lookback_is_absorbed() {
        let store = FakeStore::default();
        store.push_session(session_started_at("u1", now() - Duration::days(1)));
        let config: ConsistencyConfig =
            serde_json::from_str(r#"{"lookbackDays": 200000000000}"#).unwrap();
        let score = historical_consistency(&store, "u1", now(), &config).await;
        assert_eq!(score, 0.3);
    }

    #[tokio::test]
    async fn session_exactly_at_cutoff_counts() {
        let store = FakeStore::default();
        store.push_session(session_started_at("u1", now() - Duration::days(14)));
        let score = historical_consistency(&store, "u1", now(), &ConsistencyConfig::default()).await;
        assert!((score - 0.1).abs() < 1e-9, "got {score}");
    }

    #[tokio::test]
    async fn session_just_before_cutoff_is_stale() {
        let store = FakeStore::default();
        store.push_session(session_started_at(
            "u1",
            now() - Duration::days(14) - Duration::seconds(1),
        ));
        let score = historical_consistency(&store, "u1", now(), &ConsistencyConfig::default()).await;
        assert_eq!(score, 0.4);
    }

    #[tokio::test]
    async fn only_old_sessions_scores_stale_default() {
        // Pinned: a lapsed user (0.4) outscores a brand-new one (0.3).
        let store = FakeStore::default();
        store.push_session(session_started_at("u1", now() - Duration::days(15)));
        store.push_session(session_started_at("u1", now() - Duration::days(40)));
        let score = historical_consistency(&store, "u1", now(), &ConsistencyConfig::default()).await;
        assert_eq!(score, 0.4);
    }

    #[tokio::test]
    async fn counts_distinct_days_in_window() {
        let store = FakeStore::default();
        for days_ago in [0, 0, 1, 3, 3, 13] {
            store.push_session(session_started_at("u1", now() - Duration::days(days_ago)));
        }
        store.push_session(session_started_at("u1", now() - Duration::days(20)));
        // another user's history must not leak in
        store.push_session(session_started_at("u2", now() - Duration::days(5)));

        let score = historical_consistency(&store, "u1", now(), &ConsistencyConfig::default()).await;
        assert!((score - 0.4).abs() < 1e-9, "got {score}");
    }

    #[tokio::test]
    async fn caps_at_one() {
        let store = FakeStore::default();
        for days_ago in 0..12 {
            store.push_session(session_started_at("u1", now() - Duration::days(days_ago)));
        }
        let score = historical_consistency(&store, "u1", now(), &ConsistencyConfig::default()).await;
        assert_eq!(score, 1.0);
    }

    #[tokio::test]
    async fn history_limit_bounds_the_lookup() {
        let store = FakeStore::default();
        for days_ago in 0..8 {
            store.push_session(session_started_at("u1", now() - Duration::days(days_ago)));
        }
        let config = ConsistencyConfig {
            history_limit: 5,
            ..ConsistencyConfig::default()
        };
        let score = historical_consistency(&store, "u1", now(), &config).await;
        assert!((score - 0.5).abs() < 1e-9, "got {score}");
    }
}

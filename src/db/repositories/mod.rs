//! Table-level queries, plus the `store` trait implementations that route
//! the scoring engine onto them.

mod fatigue_scores;
mod sessions;

use anyhow::Result;

use crate::db::connection::Database;
use crate::models::{FatigueScore, StudySession};
use crate::store::{ScoreStore, SessionHistory};

impl SessionHistory for Database {
    async fn recent_sessions(&self, user_id: &str, limit: usize) -> Result<Vec<StudySession>> {
        self.get_recent_sessions(user_id, limit).await
    }
}

impl ScoreStore for Database {
    async fn insert_session(&self, session: &StudySession) -> Result<()> {
        Database::insert_session(self, session).await
    }

    async fn upsert_daily_score(&self, score: &FatigueScore) -> Result<FatigueScore> {
        self.upsert_fatigue_score(score).await
    }

    async fn latest_score_per_user(&self, limit: usize) -> Result<Vec<FatigueScore>> {
        self.get_high_risk_scores(limit).await
    }

    async fn fatigue_scores_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<FatigueScore>> {
        self.get_fatigue_scores_for_user(user_id, limit).await
    }
}

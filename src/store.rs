//! Persistence contract used by the scoring engine.
//!
//! `db::Database` is the production implementation; tests substitute
//! in-memory fakes.

use std::future::Future;

use anyhow::Result;

use crate::models::{FatigueScore, StudySession};

/// Read access to a user's past sessions, newest first.
pub trait SessionHistory {
    fn recent_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<StudySession>>> + Send;
}

pub trait ScoreStore: SessionHistory {
    fn insert_session(&self, session: &StudySession) -> impl Future<Output = Result<()>> + Send;

    /// Insert or replace the record for `(score.user_id, score.day)` and
    /// return the stored row. Must be atomic per key.
    fn upsert_daily_score(
        &self,
        score: &FatigueScore,
    ) -> impl Future<Output = Result<FatigueScore>> + Send;

    /// Latest record per user, highest burnout probability first.
    fn latest_score_per_user(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<FatigueScore>>> + Send;

    /// A user's daily records, most recent day first.
    fn fatigue_scores_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<FatigueScore>>> + Send;
}

//! Shared fixtures for unit tests.

use std::sync::Mutex;

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{FatigueScore, OnTask, SessionMode, StudySession};
use crate::scoring::rank_highest_risk;
use crate::store::{ScoreStore, SessionHistory};

pub fn session_started_at(user_id: &str, started_at: DateTime<Utc>) -> StudySession {
    StudySession {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        mode: SessionMode::Timer,
        goal: "studying".into(),
        planned_min: Some(30),
        actual_min: 30,
        pause_count: 1,
        self_rating: 4,
        self_on_task: OnTask::Yes,
        focus_score: 70,
        breaks: Vec::new(),
        started_at,
        ended_at: None,
        created_at: started_at,
    }
}

pub fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn fatigue_score(user_id: &str, on: &str, burnout_probability: f64) -> FatigueScore {
    let now = Utc::now();
    FatigueScore {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        day: day(on),
        total_study_hours: 3.0,
        break_frequency: 1.0,
        focus_stability: 60.0,
        fatigue_index: 40.0,
        burnout_probability,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory store; `failing()` makes every call error.
#[derive(Default)]
pub struct FakeStore {
    pub sessions: Mutex<Vec<StudySession>>,
    pub scores: Mutex<Vec<FatigueScore>>,
    fail: bool,
}

impl FakeStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn push_session(&self, session: StudySession) {
        self.sessions.lock().unwrap().push(session);
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            bail!("store unavailable");
        }
        Ok(())
    }
}

impl SessionHistory for FakeStore {
    async fn recent_sessions(&self, user_id: &str, limit: usize) -> Result<Vec<StudySession>> {
        self.check()?;
        let mut sessions: Vec<_> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions.truncate(limit);
        Ok(sessions)
    }
}

impl ScoreStore for FakeStore {
    async fn insert_session(&self, session: &StudySession) -> Result<()> {
        self.check()?;
        self.push_session(session.clone());
        Ok(())
    }

    async fn upsert_daily_score(&self, score: &FatigueScore) -> Result<FatigueScore> {
        self.check()?;
        let mut scores = self.scores.lock().unwrap();
        scores.retain(|s| !(s.user_id == score.user_id && s.day == score.day));
        scores.push(score.clone());
        Ok(score.clone())
    }

    async fn latest_score_per_user(&self, limit: usize) -> Result<Vec<FatigueScore>> {
        self.check()?;
        Ok(rank_highest_risk(self.scores.lock().unwrap().clone(), limit))
    }

    async fn fatigue_scores_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<FatigueScore>> {
        self.check()?;
        let mut scores: Vec<_> = self
            .scores
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        scores.sort_by(|a, b| b.day.cmp(&a.day));
        scores.truncate(limit);
        Ok(scores)
    }
}

//! Ingestion and reporting entry points over a `ScoreStore`.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{DailyRollup, FatigueScore, NewStudySession, StudySession};
use crate::scoring::{self, FocusComponents, ScoringConfig};
use crate::store::ScoreStore;
use crate::{log_debug, log_error, log_info};

const ENABLE_LOGS: bool = true;

pub const DEFAULT_SESSION_LIMIT: usize = 30;
pub const DEFAULT_FATIGUE_LIMIT: usize = 14;
pub const DEFAULT_RISK_LIMIT: usize = 10;

pub struct ScoringEngine<S> {
    store: S,
    config: ScoringConfig,
}

impl<S: ScoreStore> ScoringEngine<S> {
    pub fn new(store: S, config: ScoringConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn create_session(
        &self,
        user_id: &str,
        submission: NewStudySession,
    ) -> Result<StudySession, EngineError> {
        self.create_session_at(user_id, submission, Utc::now()).await
    }

    /// Validate, score and persist a session as of `now`.
    ///
    /// History is read before the insert without isolation, so concurrent
    /// submissions from one user may see slightly stale consistency input.
    pub async fn create_session_at(
        &self,
        user_id: &str,
        submission: NewStudySession,
        now: DateTime<Utc>,
    ) -> Result<StudySession, EngineError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(EngineError::InvalidSession("user_id is required".into()));
        }
        let input = submission.normalize()?;

        let consistency = scoring::historical_consistency(
            &self.store,
            user_id,
            now,
            &self.config.consistency,
        )
        .await;
        let components = FocusComponents::evaluate(&input, consistency);
        let focus_score = scoring::focus_score(&components, &self.config.focus);
        log_debug!("Focus components for {user_id}: {components:?} -> {focus_score}");

        let session = StudySession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            mode: input.mode,
            goal: input.goal,
            planned_min: input.planned_min,
            actual_min: input.actual_min,
            pause_count: input.pause_count,
            self_rating: input.self_rating,
            self_on_task: input.self_on_task,
            focus_score,
            breaks: input.breaks,
            started_at: now,
            ended_at: input.ended_at,
            created_at: now,
        };

        if let Err(err) = self.store.insert_session(&session).await {
            log_error!("Failed to store session for {user_id}: {err:#}");
            return Err(err.into());
        }
        log_info!(
            "Stored session {} for {} (focus score {})",
            session.id,
            session.user_id,
            session.focus_score
        );
        Ok(session)
    }

    /// Aggregate a daily rollup and upsert it for `(user_id, day)`.
    pub async fn record_daily_rollup(
        &self,
        user_id: &str,
        day: NaiveDate,
        rollup: DailyRollup,
    ) -> Result<FatigueScore, EngineError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(EngineError::InvalidRollup("user_id is required".into()));
        }
        rollup.validate()?;

        let assessment = scoring::assess(&rollup, &self.config.fatigue);
        let now = Utc::now();
        let score = FatigueScore {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            day,
            total_study_hours: rollup.total_study_hours,
            break_frequency: rollup.break_frequency,
            focus_stability: rollup.focus_stability,
            fatigue_index: assessment.fatigue_index,
            burnout_probability: assessment.burnout_probability,
            created_at: now,
            updated_at: now,
        };

        let stored = match self.store.upsert_daily_score(&score).await {
            Ok(stored) => stored,
            Err(err) => {
                log_error!("Failed to upsert fatigue score for {user_id} on {day}: {err:#}");
                return Err(err.into());
            }
        };
        log_info!(
            "Recorded fatigue for {} on {}: index {:.1}, burnout {:.1}%",
            stored.user_id,
            stored.day,
            stored.fatigue_index,
            stored.burnout_probability
        );
        Ok(stored)
    }

    pub async fn high_risk_users(&self, limit: usize) -> Result<Vec<FatigueScore>, EngineError> {
        Ok(self.store.latest_score_per_user(limit).await?)
    }

    pub async fn sessions_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<StudySession>, EngineError> {
        Ok(self.store.recent_sessions(user_id, limit).await?)
    }

    pub async fn fatigue_scores_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<FatigueScore>, EngineError> {
        Ok(self.store.fatigue_scores_for_user(user_id, limit).await?)
    }
}

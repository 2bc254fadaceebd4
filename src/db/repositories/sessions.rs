use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_mode, parse_on_task, parse_optional_datetime, to_i64, to_u32},
};
use crate::models::{BreakInterval, StudySession};

const SESSION_COLUMNS: &str = "id, user_id, mode, goal, planned_min, actual_min, pause_count,
     self_rating, self_on_task, focus_score, breaks, started_at, ended_at, created_at";

fn row_to_session(row: &Row) -> Result<StudySession> {
    let mode: String = row.get("mode")?;
    let on_task: String = row.get("self_on_task")?;
    let planned_min: Option<i64> = row.get("planned_min")?;
    let breaks: String = row.get("breaks")?;
    let started_at: String = row.get("started_at")?;
    let ended_at: Option<String> = row.get("ended_at")?;
    let created_at: String = row.get("created_at")?;
    let self_rating: i64 = row.get("self_rating")?;
    let focus_score: i64 = row.get("focus_score")?;

    let breaks: Vec<BreakInterval> =
        serde_json::from_str(&breaks).context("failed to parse breaks")?;

    Ok(StudySession {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        mode: parse_mode(&mode)?,
        goal: row.get("goal")?,
        planned_min: planned_min.map(|m| to_u32(m, "planned_min")).transpose()?,
        actual_min: to_u32(row.get("actual_min")?, "actual_min")?,
        pause_count: to_u32(row.get("pause_count")?, "pause_count")?,
        self_rating: to_u32(self_rating, "self_rating")?.min(u8::MAX as u32) as u8,
        self_on_task: parse_on_task(&on_task)?,
        focus_score: to_u32(focus_score, "focus_score")?.min(100) as u8,
        breaks,
        started_at: parse_datetime(&started_at, "started_at")?,
        ended_at: parse_optional_datetime(ended_at, "ended_at")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    pub async fn insert_session(&self, session: &StudySession) -> Result<()> {
        let record = session.clone();
        let breaks = serde_json::to_string(&record.breaks).context("failed to encode breaks")?;
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO study_sessions (id, user_id, mode, goal, planned_min, actual_min, pause_count,
                     self_rating, self_on_task, focus_score, breaks, started_at, ended_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    record.id,
                    record.user_id,
                    record.mode.as_str(),
                    record.goal,
                    record.planned_min,
                    record.actual_min,
                    record.pause_count,
                    record.self_rating,
                    record.self_on_task.as_str(),
                    record.focus_score,
                    breaks,
                    record.started_at.to_rfc3339(),
                    record.ended_at.as_ref().map(|dt| dt.to_rfc3339()),
                    record.created_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert study session")?;
            Ok(())
        })
        .await
    }

    /// Most recent sessions for a user by creation time.
    pub async fn get_recent_sessions(&self, user_id: &str, limit: usize) -> Result<Vec<StudySession>> {
        let user_id = user_id.to_string();
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS}
                 FROM study_sessions
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?2"
            ))?;

            let mut rows = stmt.query(params![user_id, limit])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_session(row)?);
            }

            Ok(sessions)
        })
        .await
    }
}

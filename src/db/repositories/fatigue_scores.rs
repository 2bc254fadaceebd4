use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Row};

use crate::db::{
    connection::Database,
    helpers::{format_day, parse_datetime, parse_day, to_i64},
};
use crate::models::FatigueScore;

const SCORE_COLUMNS: &str = "id, user_id, day, total_study_hours, break_frequency, focus_stability,
     fatigue_index, burnout_probability, created_at, updated_at";

fn row_to_fatigue_score(row: &Row) -> Result<FatigueScore> {
    let day: String = row.get("day")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(FatigueScore {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        day: parse_day(&day)?,
        total_study_hours: row.get("total_study_hours")?,
        break_frequency: row.get("break_frequency")?,
        focus_stability: row.get("focus_stability")?,
        fatigue_index: row.get("fatigue_index")?,
        burnout_probability: row.get("burnout_probability")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

fn query_scores(conn: &Connection, sql: &str, args: impl rusqlite::Params) -> Result<Vec<FatigueScore>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(args)?;
    let mut scores = Vec::new();
    while let Some(row) = rows.next()? {
        scores.push(row_to_fatigue_score(row)?);
    }
    Ok(scores)
}

impl Database {
    /// Insert or overwrite the score for `(user_id, day)`.
    ///
    /// A single `ON CONFLICT` statement keeps the write atomic per key; the
    /// original `id` and `created_at` survive overwrites.
    pub async fn upsert_fatigue_score(&self, score: &FatigueScore) -> Result<FatigueScore> {
        let record = score.clone();
        self.execute(move |conn| {
            let day = format_day(record.day);
            conn.execute(
                "INSERT INTO fatigue_scores (id, user_id, day, total_study_hours, break_frequency,
                     focus_stability, fatigue_index, burnout_probability, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(user_id, day) DO UPDATE SET
                     total_study_hours = excluded.total_study_hours,
                     break_frequency = excluded.break_frequency,
                     focus_stability = excluded.focus_stability,
                     fatigue_index = excluded.fatigue_index,
                     burnout_probability = excluded.burnout_probability,
                     updated_at = excluded.updated_at",
                params![
                    record.id,
                    record.user_id,
                    day,
                    record.total_study_hours,
                    record.break_frequency,
                    record.focus_stability,
                    record.fatigue_index,
                    record.burnout_probability,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to upsert fatigue score")?;

            let mut stmt = conn.prepare(&format!(
                "SELECT {SCORE_COLUMNS} FROM fatigue_scores WHERE user_id = ?1 AND day = ?2"
            ))?;
            let mut rows = stmt.query(params![record.user_id, day])?;
            let stored = match rows.next()? {
                Some(row) => row_to_fatigue_score(row)?,
                None => return Err(anyhow!("fatigue score not found after upsert")),
            };

            Ok(stored)
        })
        .await
    }

    pub async fn get_fatigue_scores_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<FatigueScore>> {
        let user_id = user_id.to_string();
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            query_scores(
                conn,
                &format!(
                    "SELECT {SCORE_COLUMNS}
                     FROM fatigue_scores
                     WHERE user_id = ?1
                     ORDER BY day DESC
                     LIMIT ?2"
                ),
                params![user_id, limit],
            )
        })
        .await
    }

    /// Latest score per user, highest burnout probability first, ties by
    /// user id.
    pub async fn get_high_risk_scores(&self, limit: usize) -> Result<Vec<FatigueScore>> {
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            query_scores(
                conn,
                &format!(
                    "SELECT {SCORE_COLUMNS}
                     FROM (
                         SELECT *, ROW_NUMBER() OVER (
                             PARTITION BY user_id ORDER BY day DESC
                         ) AS recency
                         FROM fatigue_scores
                     )
                     WHERE recency = 1
                     ORDER BY burnout_probability DESC, user_id ASC
                     LIMIT ?1"
                ),
                params![limit],
            )
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{day, fatigue_score};
    use chrono::Duration;

    #[tokio::test]
    async fn upsert_twice_keeps_one_record_with_latest_values() {
        let db = Database::in_memory().unwrap();
        let first = fatigue_score("u1", "2026-03-10", 20.0);
        let stored_first = db.upsert_fatigue_score(&first).await.unwrap();

        let mut second = fatigue_score("u1", "2026-03-10", 80.5);
        second.fatigue_index = 72.0;
        second.updated_at = first.updated_at + Duration::hours(1);
        let stored_second = db.upsert_fatigue_score(&second).await.unwrap();

        assert_eq!(stored_second.id, stored_first.id);
        assert_eq!(stored_second.burnout_probability, 80.5);
        assert_eq!(stored_second.fatigue_index, 72.0);

        let all = db.get_fatigue_scores_for_user("u1", 10).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].burnout_probability, 80.5);
    }

    #[tokio::test]
    async fn user_history_is_most_recent_day_first() {
        let db = Database::in_memory().unwrap();
        for on in ["2026-03-01", "2026-03-03", "2026-03-02"] {
            db.upsert_fatigue_score(&fatigue_score("u1", on, 10.0))
                .await
                .unwrap();
        }
        let days: Vec<_> = db
            .get_fatigue_scores_for_user("u1", 2)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.day)
            .collect();
        assert_eq!(days, vec![day("2026-03-03"), day("2026-03-02")]);
    }

    #[tokio::test]
    async fn high_risk_uses_latest_record_per_user() {
        let db = Database::in_memory().unwrap();
        let rows = [
            ("ann", "2026-03-01", 95.0),
            ("ann", "2026-03-04", 15.0),
            ("ben", "2026-03-04", 60.0),
            ("cat", "2026-03-02", 75.0),
            ("dan", "2026-03-03", 30.0),
        ];
        for (user, on, burnout) in rows {
            db.upsert_fatigue_score(&fatigue_score(user, on, burnout))
                .await
                .unwrap();
        }

        let ranked = db.get_high_risk_scores(3).await.unwrap();
        let view: Vec<_> = ranked
            .iter()
            .map(|s| (s.user_id.as_str(), s.burnout_probability))
            .collect();
        assert_eq!(view, vec![("cat", 75.0), ("ben", 60.0), ("dan", 30.0)]);
    }

    #[tokio::test]
    async fn high_risk_breaks_ties_by_user_and_honors_limit() {
        let db = Database::in_memory().unwrap();
        for user in ["zed", "amy", "kim"] {
            db.upsert_fatigue_score(&fatigue_score(user, "2026-03-05", 42.0))
                .await
                .unwrap();
        }
        db.upsert_fatigue_score(&fatigue_score("kim", "2026-03-01", 99.0))
            .await
            .unwrap();

        let users: Vec<_> = db
            .get_high_risk_scores(10)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.user_id)
            .collect();
        assert_eq!(users, vec!["amy", "kim", "zed"]);

        assert_eq!(db.get_high_risk_scores(2).await.unwrap().len(), 2);
        assert!(db.get_high_risk_scores(0).await.unwrap().is_empty());
    }
}

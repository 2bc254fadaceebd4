//! Command-line driver for the scoring engine.
//!
//! Commands:
//! - log-session: score and store a study session
//! - rollup: record a user's daily fatigue rollup
//! - high-risk: list users with the highest latest burnout probability
//! - sessions / fatigue: show a user's stored history
//! - config: print the effective scoring configuration, or replace it from a
//!   JSON file with `--file`

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::db::Database;
use crate::engine::{
    ScoringEngine, DEFAULT_FATIGUE_LIMIT, DEFAULT_RISK_LIMIT, DEFAULT_SESSION_LIMIT,
};
use crate::models::{DailyRollup, NewStudySession};
use crate::scoring::ScoringConfig;
use crate::settings::SettingsStore;

const DB_FILE_NAME: &str = "focusgauge.sqlite3";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// focusgauge - focus, fatigue and burnout scoring for study sessions
#[derive(Debug, Parser)]
#[command(name = "focusgauge")]
#[command(version)]
#[command(about = "Score study sessions and track burnout risk", long_about = None)]
pub struct Cli {
    /// Directory holding the database and settings.json
    #[arg(long, env = "FOCUSGAUGE_DATA_DIR", default_value = ".focusgauge")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score and store a study session
    LogSession {
        #[arg(long)]
        user: String,

        /// timer or stopwatch (anything else is recorded as stopwatch)
        #[arg(long, default_value = "stopwatch")]
        mode: String,

        #[arg(long, default_value = "")]
        goal: String,

        /// Planned minutes (timer mode only)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        planned: i64,

        /// Actual minutes studied
        #[arg(long, allow_negative_numbers = true)]
        actual: i64,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        pauses: i64,

        /// Self rating 1-5 (non-positive defaults to 3)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rating: i64,

        /// yes, somewhat or no
        #[arg(long, default_value = "")]
        on_task: String,

        /// RFC 3339 end time
        #[arg(long)]
        ended_at: Option<DateTime<Utc>>,
    },

    /// Record a daily fatigue rollup
    Rollup {
        #[arg(long)]
        user: String,

        /// Calendar day (YYYY-MM-DD), defaults to today in UTC
        #[arg(long)]
        day: Option<NaiveDate>,

        #[arg(long)]
        hours: f64,

        /// Breaks per hour
        #[arg(long, default_value_t = 0.0)]
        breaks_per_hour: f64,

        /// Focus stability 0-100
        #[arg(long, default_value_t = 100.0)]
        stability: f64,
    },

    /// Users with the highest latest burnout probability
    HighRisk {
        #[arg(long, default_value_t = DEFAULT_RISK_LIMIT)]
        limit: usize,
    },

    /// A user's most recent sessions
    Sessions {
        #[arg(long)]
        user: String,

        #[arg(long, default_value_t = DEFAULT_SESSION_LIMIT)]
        limit: usize,
    },

    /// A user's daily fatigue records
    Fatigue {
        #[arg(long)]
        user: String,

        #[arg(long, default_value_t = DEFAULT_FATIGUE_LIMIT)]
        limit: usize,
    },

    /// Print the effective scoring configuration
    Config {
        /// Validate this scoring JSON and save it to settings.json first
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let settings = SettingsStore::new(cli.data_dir.join(SETTINGS_FILE_NAME))?;

    if let Commands::Config { file } = &cli.command {
        if let Some(file) = file {
            let contents = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let scoring: ScoringConfig = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse scoring settings in {}", file.display()))?;
            settings.update_scoring(scoring)?;
        }
        return print_json(&settings.scoring());
    }

    let database = Database::new(cli.data_dir.join(DB_FILE_NAME))
        .with_context(|| format!("failed to open database in {}", cli.data_dir.display()))?;
    let engine = ScoringEngine::new(database, settings.scoring());

    match cli.command {
        Commands::LogSession {
            user,
            mode,
            goal,
            planned,
            actual,
            pauses,
            rating,
            on_task,
            ended_at,
        } => {
            let submission = NewStudySession {
                mode,
                goal,
                planned_min: planned,
                actual_min: actual,
                pause_count: pauses,
                self_rating: rating,
                self_on_task: on_task,
                ended_at,
                breaks: Vec::new(),
            };
            print_json(&engine.create_session(&user, submission).await?)
        }
        Commands::Rollup {
            user,
            day,
            hours,
            breaks_per_hour,
            stability,
        } => {
            let day = day.unwrap_or_else(|| Utc::now().date_naive());
            let rollup = DailyRollup {
                total_study_hours: hours,
                break_frequency: breaks_per_hour,
                focus_stability: stability,
            };
            print_json(&engine.record_daily_rollup(&user, day, rollup).await?)
        }
        Commands::HighRisk { limit } => print_json(&engine.high_risk_users(limit).await?),
        Commands::Sessions { user, limit } => {
            print_json(&engine.sessions_for_user(&user, limit).await?)
        }
        Commands::Fatigue { user, limit } => {
            print_json(&engine.fatigue_scores_for_user(&user, limit).await?)
        }
        Commands::Config { .. } => print_json(engine.config()),
    }
}

//! focusgauge - behavioral scoring engine for study sessions.
//!
//! Turns session telemetry (duration, pauses, self-report) into a per-session
//! focus score, rolls daily aggregates into a fatigue index and burnout
//! probability, and ranks users by risk. Persistence goes through the
//! `store` traits, implemented over SQLite by `db::Database`.

mod utils;

pub mod cli;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod scoring;
pub mod settings;
pub mod store;

#[cfg(test)]
mod test_support;

use clap::Parser;

pub use db::Database;
pub use engine::ScoringEngine;
pub use error::EngineError;
pub use scoring::ScoringConfig;

/// Parse the command line and run it to completion.
pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = cli::Cli::parse();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(cli::dispatch(cli))
}

pub mod baseline;
pub mod components;
pub mod config;
pub mod consistency;
pub mod fatigue;
pub mod focus;
pub mod risk;

pub use baseline::baseline_minutes;
pub use components::{completion_ratio, self_report_component, stability_from_pauses};
pub use config::{ConsistencyConfig, FatigueWeights, FocusWeights, ScoringConfig};
pub use consistency::historical_consistency;
pub use fatigue::{assess, burnout_probability, fatigue_index, FatigueAssessment};
pub use focus::{focus_score, score_session, FocusComponents};
pub use risk::rank_highest_risk;

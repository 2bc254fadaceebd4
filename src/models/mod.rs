pub mod fatigue;
pub mod session;

pub use fatigue::{DailyRollup, FatigueScore};
pub use session::{
    normalize_goal, BreakInterval, NewStudySession, OnTask, SessionInput, SessionMode,
    StudySession,
};

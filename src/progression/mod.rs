//! Progression systems

pub mod level;
pub mod streak;
pub mod scoring;
pub mod reconcile;
pub mod milestones;
pub mod report;

pub use level::{level_for_xp, progress_fraction, validate_xp, LevelSummary, XP_PER_LEVEL};
pub use streak::{next_streak, days_since_practice, practiced_today};
pub use scoring::{score, PerformanceEvent, PerformanceResult, ScoreGrade, BASELINE_TEMPO_SCORE};
pub use reconcile::{reconcile, local_update, ProfileUpdate, UpdateSource};
pub use milestones::{Milestone, MilestoneInfo, unlocked, newly_unlocked};
pub use report::ProgressReport;

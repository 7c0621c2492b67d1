//! SightReadPro - practice progression engine
//!
//! Turns completed sight-reading exercises into XP, levels and daily
//! streaks, reconciling local results with the practice server.

pub mod api;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod progression;
pub mod save;

// Re-export commonly used types
pub use clock::{Clock, DayBoundary, FixedClock, SystemClock};
pub use config::Config;
pub use engine::{CompletionOutcome, PracticeEngine, ProgressStore};
pub use error::{ConfigError, ProgressError, StorageError, SubmitError};
pub use progression::{PerformanceEvent, PerformanceResult, ProfileUpdate, ProgressReport};
pub use save::{JsonProfileStorage, ProfileStorage, UserProfile};

//! JSON bodies exchanged with the practice server

use serde::{Deserialize, Serialize};

use crate::progression::{PerformanceEvent, PerformanceResult};

/// Body of `POST /users/submit_performance`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSubmission {
    pub user_id: String,
    pub exercise_id: u64,
    pub score: u8,
    pub accuracy: u8,
    pub rhythm_score: u8,
    pub tempo_score: u8,
    pub practice_time_seconds: u64,
    pub mistakes_count: u32,
}

impl PerformanceSubmission {
    pub fn new(user_id: &str, event: &PerformanceEvent, result: &PerformanceResult) -> Self {
        Self {
            user_id: user_id.to_string(),
            exercise_id: event.exercise_id,
            score: result.score,
            accuracy: result.accuracy,
            rhythm_score: result.rhythm_score,
            tempo_score: result.tempo_score,
            practice_time_seconds: event.practice_time_seconds,
            mistakes_count: event.mistakes,
        }
    }
}

/// Response to a submission, as received.
///
/// Fields are optional and signed so a partial or nonsensical response can
/// be told apart from a good one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServerResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub xp_earned: Option<i64>,
    #[serde(default)]
    pub new_total_xp: Option<i64>,
    #[serde(default)]
    pub new_level: Option<i64>,
    #[serde(default)]
    pub new_streak: Option<i64>,
    #[serde(default)]
    pub streak_updated: Option<bool>,
}

/// A server result that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedProgress {
    pub xp_earned: Option<u64>,
    pub new_total_xp: u64,
    pub new_streak: u32,
    pub streak_updated: bool,
}

impl ServerResult {
    /// Check the result is complete and usable.
    ///
    /// `new_level` must be present but its value is not used; callers derive
    /// the level from `new_total_xp`.
    pub fn confirmed(&self, previous_total_xp: u64) -> Option<ConfirmedProgress> {
        let new_total_xp = u64::try_from(self.new_total_xp?).ok()?;
        let _level = u64::try_from(self.new_level?).ok()?;
        let new_streak = u32::try_from(self.new_streak?).ok()?;
        let streak_updated = self.streak_updated?;

        if new_total_xp < previous_total_xp {
            return None;
        }

        let xp_earned = match self.xp_earned {
            Some(raw) => Some(u64::try_from(raw).ok()?),
            None => None,
        };

        Some(ConfirmedProgress {
            xp_earned,
            new_total_xp,
            new_streak,
            streak_updated,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
}

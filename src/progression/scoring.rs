//! Performance scoring
//!
//! Turns the raw telemetry of one attempt into the scores shown after an
//! exercise. Everything here is local; the server may later override XP.

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Tempo cannot be sensed yet, so every attempt gets the same baseline
pub const BASELINE_TEMPO_SCORE: u8 = 85;

const SCORE_PENALTY: u32 = 10;
const ACCURACY_PENALTY: u32 = 15;
const RHYTHM_PENALTY: u32 = 5;

/// One attempt at one exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceEvent {
    pub exercise_id: u64,
    /// Incorrect responses during the attempt
    pub mistakes: u32,
    pub practice_time_seconds: u64,
    /// Base reward defined by the exercise
    pub xp_reward: u64,
}

impl PerformanceEvent {
    pub fn new(exercise_id: u64, mistakes: u32, practice_time_seconds: u64, xp_reward: u64) -> Self {
        Self {
            exercise_id,
            mistakes,
            practice_time_seconds,
            xp_reward,
        }
    }

    /// Build an event from signed values received at the API boundary
    pub fn from_raw(
        exercise_id: i64,
        mistakes: i64,
        practice_time_seconds: i64,
        xp_reward: i64,
    ) -> Result<Self, ProgressError> {
        Ok(Self {
            exercise_id: non_negative("exercise_id", exercise_id)?,
            mistakes: non_negative("mistakes", mistakes)?,
            practice_time_seconds: non_negative("practice_time_seconds", practice_time_seconds)?,
            xp_reward: non_negative("xp_reward", xp_reward)?,
        })
    }
}

fn non_negative<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<T, ProgressError> {
    if value < 0 {
        return Err(ProgressError::NegativeValue { field, value });
    }
    T::try_from(value).map_err(|_| ProgressError::OutOfRange { field, value })
}

/// Locally computed outcome of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceResult {
    pub score: u8,
    pub accuracy: u8,
    pub rhythm_score: u8,
    pub tempo_score: u8,
    pub xp_earned: u64,
    pub mistakes: u32,
    pub practice_time_seconds: u64,
}

/// Score an attempt
pub fn score(event: &PerformanceEvent) -> PerformanceResult {
    PerformanceResult {
        score: penalized(event.mistakes, SCORE_PENALTY),
        accuracy: penalized(event.mistakes, ACCURACY_PENALTY),
        rhythm_score: penalized(event.mistakes, RHYTHM_PENALTY),
        tempo_score: BASELINE_TEMPO_SCORE,
        xp_earned: event.xp_reward,
        mistakes: event.mistakes,
        practice_time_seconds: event.practice_time_seconds,
    }
}

/// 100 minus a per-mistake penalty, clamped to [0, 100]
fn penalized(mistakes: u32, per_mistake: u32) -> u8 {
    let penalty = mistakes.saturating_mul(per_mistake);
    100u32.saturating_sub(penalty) as u8
}

/// Feedback band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreGrade {
    Excellent,
    Good,
    KeepPracticing,
    DontGiveUp,
}

impl ScoreGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ScoreGrade::Excellent,
            70..=89 => ScoreGrade::Good,
            50..=69 => ScoreGrade::KeepPracticing,
            _ => ScoreGrade::DontGiveUp,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "Excellent!",
            ScoreGrade::Good => "Good job!",
            ScoreGrade::KeepPracticing => "Keep practicing!",
            ScoreGrade::DontGiveUp => "Don't give up!",
        }
    }
}

//! Experience and leveling
//!
//! Levels are fixed-width: every 100 XP is one level, starting at level 1.

use serde::Serialize;

use crate::error::ProgressError;

/// XP needed to advance one level
pub const XP_PER_LEVEL: u64 = 100;

/// Level for a given total XP
pub fn level_for_xp(total_xp: u64) -> u64 {
    total_xp / XP_PER_LEVEL + 1
}

/// Fraction of the current level already earned, in [0, 1)
pub fn progress_fraction(total_xp: u64) -> f64 {
    xp_in_level(total_xp) as f64 / XP_PER_LEVEL as f64
}

/// XP earned since the start of the current level
pub fn xp_in_level(total_xp: u64) -> u64 {
    total_xp % XP_PER_LEVEL
}

/// XP still missing before the next level (1..=100)
pub fn xp_to_next_level(total_xp: u64) -> u64 {
    XP_PER_LEVEL - xp_in_level(total_xp)
}

/// Total XP at which a level begins
pub fn xp_at_level_start(level: u64) -> u64 {
    level.saturating_sub(1) * XP_PER_LEVEL
}

/// Accept a raw XP value from outside the core.
///
/// Negative values are caller bugs and are rejected, never clamped.
pub fn validate_xp(raw: i64) -> Result<u64, ProgressError> {
    u64::try_from(raw).map_err(|_| ProgressError::NegativeValue {
        field: "total_xp",
        value: raw,
    })
}

/// Level position for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelSummary {
    pub level: u64,
    pub xp_in_level: u64,
    pub xp_to_next_level: u64,
    /// Progress through the level in percent, two decimals
    pub progress_percent: f64,
}

impl LevelSummary {
    pub fn from_xp(total_xp: u64) -> Self {
        let percent = progress_fraction(total_xp) * 100.0;
        Self {
            level: level_for_xp(total_xp),
            xp_in_level: xp_in_level(total_xp),
            xp_to_next_level: xp_to_next_level(total_xp),
            progress_percent: (percent * 100.0).round() / 100.0,
        }
    }
}

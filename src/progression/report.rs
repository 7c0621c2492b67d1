//! Progress report for display

use chrono::NaiveDate;
use serde::Serialize;

use super::level::LevelSummary;
use super::milestones::{unlocked, Milestone};
use super::streak::{days_since_practice, practiced_today};
use crate::save::UserProfile;

/// Snapshot of a profile as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub user_id: String,
    pub total_xp: u64,
    pub level: LevelSummary,
    pub streak_days: u32,
    pub exercises_completed: u64,
    pub last_practice_date: Option<NaiveDate>,
    pub practiced_today: bool,
    pub days_since_practice: Option<i64>,
    pub milestones: Vec<Milestone>,
}

impl ProgressReport {
    pub fn build(profile: &UserProfile, today: NaiveDate) -> Self {
        Self {
            user_id: profile.id.clone(),
            total_xp: profile.total_xp,
            level: LevelSummary::from_xp(profile.total_xp),
            streak_days: profile.streak_days,
            exercises_completed: profile.exercises_completed,
            last_practice_date: profile.last_practice_date,
            practiced_today: practiced_today(profile.last_practice_date, today),
            days_since_practice: days_since_practice(profile.last_practice_date, today),
            milestones: unlocked(profile),
        }
    }
}

//! Local vs. server progress reconciliation
//!
//! A completed exercise yields exactly one source of truth: the server's
//! confirmed numbers when they are complete, otherwise the local computation.
//! Fields are never mixed between the two.

use chrono::NaiveDate;
use serde::Serialize;

use super::level::level_for_xp;
use super::scoring::{PerformanceEvent, PerformanceResult};
use super::streak::{next_streak, streak_changes};
use crate::api::ServerResult;
use crate::save::UserProfile;

/// Where the numbers of an update came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateSource {
    Server,
    Local,
}

/// Complete next state of a profile after one completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub user_id: String,
    /// Store revision the update was computed against
    pub base_revision: u64,
    pub total_xp: u64,
    /// Always derived from `total_xp`
    pub level: u64,
    pub streak_days: u32,
    pub streak_updated: bool,
    pub last_practice_date: NaiveDate,
    pub exercises_completed: u64,
    pub xp_earned: u64,
    pub source: UpdateSource,
}

impl ProfileUpdate {
    /// Profile after applying this update
    pub fn applied_to(&self, profile: &UserProfile) -> UserProfile {
        UserProfile {
            total_xp: self.total_xp,
            streak_days: self.streak_days,
            last_practice_date: Some(self.last_practice_date),
            exercises_completed: self.exercises_completed,
            ..profile.clone()
        }
    }
}

/// Update computed only from local data
pub fn local_update(
    profile: &UserProfile,
    base_revision: u64,
    result: &PerformanceResult,
    today: NaiveDate,
) -> ProfileUpdate {
    let total_xp = profile.total_xp.saturating_add(result.xp_earned);
    ProfileUpdate {
        user_id: profile.id.clone(),
        base_revision,
        total_xp,
        level: level_for_xp(total_xp),
        streak_days: next_streak(profile.streak_days, profile.last_practice_date, today),
        streak_updated: streak_changes(profile.last_practice_date, today),
        last_practice_date: today,
        exercises_completed: profile.exercises_completed.saturating_add(1),
        xp_earned: result.xp_earned,
        source: UpdateSource::Local,
    }
}

/// Decide the next profile state for one completed exercise.
///
/// A complete server result wins wholesale; anything else (absent, partial,
/// negative, or lowering XP) falls back to the local update.
pub fn reconcile(
    profile: &UserProfile,
    base_revision: u64,
    event: &PerformanceEvent,
    local: &PerformanceResult,
    server: Option<&ServerResult>,
    today: NaiveDate,
) -> ProfileUpdate {
    let fallback = local_update(profile, base_revision, local, today);

    let Some(server) = server else {
        log::debug!("No server result for exercise {}, using local progress", event.exercise_id);
        return fallback;
    };

    let Some(confirmed) = server.confirmed(profile.total_xp) else {
        log::warn!(
            "Discarding malformed server result for exercise {}: {:?}",
            event.exercise_id,
            server
        );
        return fallback;
    };

    ProfileUpdate {
        total_xp: confirmed.new_total_xp,
        level: level_for_xp(confirmed.new_total_xp),
        streak_days: confirmed.new_streak,
        streak_updated: confirmed.streak_updated,
        xp_earned: confirmed
            .xp_earned
            .unwrap_or(confirmed.new_total_xp - profile.total_xp),
        source: UpdateSource::Server,
        ..fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::score;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            total_xp: 90,
            streak_days: 3,
            last_practice_date: Some(today() - Duration::days(1)),
            exercises_completed: 12,
            ..UserProfile::new("ada")
        }
    }

    fn server_result() -> ServerResult {
        ServerResult {
            message: None,
            xp_earned: Some(18),
            new_total_xp: Some(340),
            new_level: Some(99),
            new_streak: Some(10),
            streak_updated: Some(true),
        }
    }

    #[test]
    fn test_absent_server_result_uses_local() {
        let event = PerformanceEvent::new(1, 1, 60, 20);
        let local = score(&event);
        let update = reconcile(&profile(), 4, &event, &local, None, today());

        assert_eq!(update, local_update(&profile(), 4, &local, today()));
        assert_eq!(update.total_xp, 110);
        assert_eq!(update.level, 2);
        assert_eq!(update.streak_days, 4);
        assert_eq!(update.exercises_completed, 13);
        assert_eq!(update.last_practice_date, today());
        assert_eq!(update.source, UpdateSource::Local);
        assert!(update.streak_updated);
    }

    #[test]
    fn test_server_wins_wholesale() {
        let event = PerformanceEvent::new(1, 1, 60, 20);
        let local = score(&event);
        let server = server_result();
        let update = reconcile(&profile(), 4, &event, &local, Some(&server), today());

        // Not summed with the local reward
        assert_eq!(update.total_xp, 340);
        // Recomputed, not copied from the server's 99
        assert_eq!(update.level, 4);
        assert_eq!(update.streak_days, 10);
        assert_eq!(update.xp_earned, 18);
        assert_eq!(update.exercises_completed, 13);
        assert_eq!(update.source, UpdateSource::Server);
    }

    #[test]
    fn test_xp_earned_derived_when_server_omits_it() {
        let event = PerformanceEvent::new(1, 0, 60, 20);
        let mut server = server_result();
        server.xp_earned = None;
        let update = reconcile(&profile(), 0, &event, &score(&event), Some(&server), today());
        assert_eq!(update.xp_earned, 250);
    }

    #[test]
    fn test_partial_server_result_is_not_merged() {
        let event = PerformanceEvent::new(1, 2, 60, 20);
        let local = score(&event);
        let mut partial = server_result();
        partial.new_streak = None;

        let update = reconcile(&profile(), 0, &event, &local, Some(&partial), today());
        assert_eq!(update, local_update(&profile(), 0, &local, today()));
        assert_ne!(update.total_xp, 340);
    }

    #[test]
    fn test_server_xp_below_current_is_rejected() {
        let event = PerformanceEvent::new(1, 0, 60, 20);
        let mut lower = server_result();
        lower.new_total_xp = Some(50);

        let update = reconcile(&profile(), 0, &event, &score(&event), Some(&lower), today());
        assert_eq!(update.source, UpdateSource::Local);
        assert_eq!(update.total_xp, 110);
    }

    #[test]
    fn test_same_day_completion_keeps_streak() {
        let mut same_day = profile();
        same_day.last_practice_date = Some(today());
        let event = PerformanceEvent::new(1, 0, 60, 5);
        let update = reconcile(&same_day, 0, &event, &score(&event), None, today());
        assert_eq!(update.streak_days, 3);
        assert!(!update.streak_updated);
    }

    #[test]
    fn test_applied_to_keeps_identity() {
        let event = PerformanceEvent::new(1, 0, 60, 5);
        let update = local_update(&profile(), 0, &score(&event), today());
        let next = update.applied_to(&profile());
        assert_eq!(next.id, "ada");
        assert_eq!(next.total_xp, 95);
        assert_eq!(next.last_practice_date, Some(today()));
    }
}

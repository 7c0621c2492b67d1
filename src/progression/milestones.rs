//! Practice milestones
//!
//! Milestones are read off the profile every time; nothing is stored.

use serde::Serialize;

use crate::save::UserProfile;

/// Milestone identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    FirstExercise,
    #[serde(rename = "streak_3_days")]
    Streak3Days,
    #[serde(rename = "streak_7_days")]
    Streak7Days,
    #[serde(rename = "streak_30_days")]
    Streak30Days,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "level_10")]
    Level10,
    #[serde(rename = "level_20")]
    Level20,
}

/// Milestone definition
#[derive(Debug, Clone)]
pub struct MilestoneInfo {
    pub id: Milestone,
    pub name: &'static str,
    pub description: &'static str,
}

impl Milestone {
    pub const ALL: [Milestone; 7] = [
        Milestone::FirstExercise,
        Milestone::Streak3Days,
        Milestone::Streak7Days,
        Milestone::Streak30Days,
        Milestone::Level5,
        Milestone::Level10,
        Milestone::Level20,
    ];

    /// Whether the profile currently satisfies this milestone
    pub fn is_reached(&self, profile: &UserProfile) -> bool {
        match self {
            Milestone::FirstExercise => profile.exercises_completed >= 1,
            Milestone::Streak3Days => profile.streak_days >= 3,
            Milestone::Streak7Days => profile.streak_days >= 7,
            Milestone::Streak30Days => profile.streak_days >= 30,
            Milestone::Level5 => profile.level() >= 5,
            Milestone::Level10 => profile.level() >= 10,
            Milestone::Level20 => profile.level() >= 20,
        }
    }

    pub fn info(&self) -> MilestoneInfo {
        let (name, description) = match self {
            Milestone::FirstExercise => ("First Steps", "Complete your first exercise"),
            Milestone::Streak3Days => ("On a Roll", "Practice 3 days in a row"),
            Milestone::Streak7Days => ("Week Warrior", "Practice 7 days in a row"),
            Milestone::Streak30Days => ("Dedicated", "Practice 30 days in a row"),
            Milestone::Level5 => ("Sight Reader", "Reach level 5"),
            Milestone::Level10 => ("Fluent Reader", "Reach level 10"),
            Milestone::Level20 => ("Virtuoso", "Reach level 20"),
        };
        MilestoneInfo {
            id: *self,
            name,
            description,
        }
    }
}

/// All milestones the profile satisfies
pub fn unlocked(profile: &UserProfile) -> Vec<Milestone> {
    Milestone::ALL
        .into_iter()
        .filter(|m| m.is_reached(profile))
        .collect()
}

/// Milestones satisfied by `after` but not by `before`
pub fn newly_unlocked(before: &UserProfile, after: &UserProfile) -> Vec<Milestone> {
    Milestone::ALL
        .into_iter()
        .filter(|m| m.is_reached(after) && !m.is_reached(before))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_profile_has_none() {
        assert!(unlocked(&UserProfile::new("ada")).is_empty());
    }

    #[test]
    fn test_unlocked_by_state() {
        let profile = UserProfile {
            total_xp: 950,
            streak_days: 7,
            exercises_completed: 40,
            ..UserProfile::new("ada")
        };
        assert_eq!(
            unlocked(&profile),
            vec![
                Milestone::FirstExercise,
                Milestone::Streak3Days,
                Milestone::Streak7Days,
                Milestone::Level5,
                Milestone::Level10,
            ]
        );
    }

    #[test]
    fn test_newly_unlocked() {
        let before = UserProfile {
            total_xp: 390,
            streak_days: 2,
            exercises_completed: 5,
            ..UserProfile::new("ada")
        };
        let after = UserProfile {
            total_xp: 410,
            streak_days: 3,
            exercises_completed: 6,
            ..before.clone()
        };
        assert_eq!(
            newly_unlocked(&before, &after),
            vec![Milestone::Streak3Days, Milestone::Level5]
        );
        assert!(newly_unlocked(&after, &after).is_empty());
    }

    #[test]
    fn test_info() {
        assert_eq!(Milestone::Level20.info().name, "Virtuoso");
    }
}

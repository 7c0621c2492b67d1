//! Daily practice streaks
//!
//! Dates are calendar days produced by a single `Clock`, so "today" and the
//! stored last-practice date always share one day boundary.

use chrono::NaiveDate;

/// Streak after completing an exercise on `today`.
///
/// Same day keeps the streak, the next day extends it, anything else
/// (a gap, or a last date in the future from clock skew) starts over at 1.
pub fn next_streak(current_streak: u32, last_practice: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(last) = last_practice else {
        return 1;
    };

    match (today - last).num_days() {
        0 => current_streak,
        1 => current_streak.saturating_add(1),
        _ => 1,
    }
}

/// Whether the streak counter moves for a completion on `today`
pub fn streak_changes(last_practice: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_practice != Some(today)
}

/// Whole days since the last practice, `None` if never practiced.
///
/// A last date in the future reads as 0.
pub fn days_since_practice(last_practice: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    last_practice.map(|last| (today - last).num_days().max(0))
}

pub fn practiced_today(last_practice: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_practice == Some(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_first_practice_starts_streak() {
        assert_eq!(next_streak(0, None, today()), 1);
        assert_eq!(next_streak(7, None, today()), 1);
    }

    #[test]
    fn test_same_day_is_idempotent() {
        assert_eq!(next_streak(5, Some(today()), today()), 5);
    }

    #[test]
    fn test_consecutive_day_extends() {
        let yesterday = today() - Duration::days(1);
        assert_eq!(next_streak(5, Some(yesterday), today()), 6);
    }

    #[test]
    fn test_consecutive_across_month_boundary() {
        // 2026-02-28 -> 2026-03-01
        let feb_28 = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(next_streak(2, Some(feb_28), today()), 3);
    }

    #[test]
    fn test_gap_resets() {
        let two_days_ago = today() - Duration::days(2);
        assert_eq!(next_streak(5, Some(two_days_ago), today()), 1);
        let last_year = today() - Duration::days(365);
        assert_eq!(next_streak(40, Some(last_year), today()), 1);
    }

    #[test]
    fn test_future_date_resets() {
        let tomorrow = today() + Duration::days(1);
        assert_eq!(next_streak(5, Some(tomorrow), today()), 1);
    }

    #[test]
    fn test_streak_changes() {
        assert!(streak_changes(None, today()));
        assert!(streak_changes(Some(today() - Duration::days(1)), today()));
        assert!(!streak_changes(Some(today()), today()));
    }

    #[test]
    fn test_days_since_practice() {
        assert_eq!(days_since_practice(None, today()), None);
        assert_eq!(days_since_practice(Some(today()), today()), Some(0));
        assert_eq!(days_since_practice(Some(today() - Duration::days(4)), today()), Some(4));
        assert_eq!(days_since_practice(Some(today() + Duration::days(2)), today()), Some(0));
        assert!(practiced_today(Some(today()), today()));
        assert!(!practiced_today(None, today()));
    }
}

//! End-to-end completion scenarios against file-backed storage

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use sightreadpro::api::{OfflineSubmitter, PerformanceSubmission, PerformanceSubmitter, ServerResult};
use sightreadpro::progression::{Milestone, UpdateSource};
use sightreadpro::{
    FixedClock, JsonProfileStorage, PerformanceEvent, PracticeEngine, ProfileStorage,
    ProgressStore, SubmitError, UserProfile,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

/// Answers with a body that lacks the streak fields
struct HalfBakedServer;

#[async_trait]
impl PerformanceSubmitter for HalfBakedServer {
    async fn submit_performance(
        &self,
        _submission: &PerformanceSubmission,
    ) -> Result<ServerResult, SubmitError> {
        Ok(serde_json::from_str(r#"{"message":"ok","new_total_xp":900,"new_level":10}"#)
            .expect("fixture parses"))
    }
}

fn seeded_storage(dir: &std::path::Path) -> Arc<JsonProfileStorage> {
    let storage = Arc::new(JsonProfileStorage::new(dir));
    let profile = UserProfile {
        total_xp: 90,
        streak_days: 3,
        last_practice_date: Some(today() - Duration::days(1)),
        exercises_completed: 7,
        ..UserProfile::new("ada")
    };
    storage.save_profile(&profile).unwrap();
    storage
}

#[tokio::test]
async fn unreachable_server_levels_up_from_local_progress() {
    let dir = tempfile::tempdir().unwrap();
    let storage = seeded_storage(dir.path());
    let store = Arc::new(ProgressStore::open(storage.clone(), "ada").unwrap());
    let engine = PracticeEngine::new(
        store,
        Arc::new(OfflineSubmitter),
        Arc::new(FixedClock::new(today())),
    );

    let outcome = engine.complete(PerformanceEvent::new(4, 1, 75, 20)).await.unwrap();

    assert_eq!(outcome.result.score, 90);
    assert_eq!(outcome.update.source, UpdateSource::Local);
    assert_eq!(outcome.profile.total_xp, 110);
    assert_eq!(outcome.profile.level(), 2);
    assert_eq!(outcome.profile.streak_days, 4);
    assert_eq!(outcome.profile.exercises_completed, 8);
    assert!(outcome.new_milestones.is_empty());

    // What was applied is what was saved
    let reloaded = storage.load_profile("ada").unwrap().unwrap();
    assert_eq!(reloaded, engine.current());
}

#[tokio::test]
async fn partial_server_body_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let storage = seeded_storage(dir.path());
    let store = Arc::new(ProgressStore::open(storage, "ada").unwrap());
    let engine = PracticeEngine::new(
        store,
        Arc::new(HalfBakedServer),
        Arc::new(FixedClock::new(today())),
    );

    let outcome = engine.complete(PerformanceEvent::new(4, 0, 75, 20)).await.unwrap();
    assert!(!outcome.confirmed());
    assert_eq!(engine.current().total_xp, 110);
    assert_eq!(engine.current().streak_days, 4);
}

#[tokio::test]
async fn fresh_profile_first_week() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(JsonProfileStorage::new(dir.path()));
    let store = Arc::new(ProgressStore::open(storage.clone(), "grace").unwrap());
    let clock = Arc::new(FixedClock::new(today()));
    let engine = PracticeEngine::new(store, Arc::new(OfflineSubmitter), clock.clone());

    let mut reached = Vec::new();
    for day in 0..7 {
        let outcome = engine
            .complete(PerformanceEvent::new(day + 1, 0, 60, 15))
            .await
            .unwrap();
        reached.extend(outcome.new_milestones);
        clock.advance_days(1);
    }

    let profile = engine.current();
    assert_eq!(profile.streak_days, 7);
    assert_eq!(profile.total_xp, 105);
    assert_eq!(
        reached,
        vec![Milestone::FirstExercise, Milestone::Streak3Days, Milestone::Streak7Days]
    );
    assert_eq!(storage.load_profile("grace").unwrap(), Some(profile));
}

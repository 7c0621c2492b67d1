//! Exercise completion flow
//!
//! Score locally, ask the server, reconcile, apply. Completions for a profile
//! run one at a time in the order `complete` was called, on a worker task that
//! owns the whole sequence. A caller that stops waiting does not stop its
//! completion; the exercise is still applied, from local progress if the
//! server never answers.

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use super::store::ProgressStore;
use crate::api::{HealthCheck, PerformanceSubmission, PerformanceSubmitter, ServerResult};
use crate::clock::Clock;
use crate::error::{ProgressError, StorageError, SubmitError};
use crate::progression::{
    newly_unlocked, reconcile, score, Milestone, PerformanceEvent, PerformanceResult,
    ProfileUpdate, ProgressReport, ScoreGrade, UpdateSource,
};
use crate::save::UserProfile;

/// Default wait for the server before using local progress
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the UI needs after one exercise
#[derive(Debug, Serialize)]
pub struct CompletionOutcome {
    pub result: PerformanceResult,
    pub grade: ScoreGrade,
    pub update: ProfileUpdate,
    pub profile: UserProfile,
    pub new_milestones: Vec<Milestone>,
    #[serde(skip)]
    pub persist_error: Option<StorageError>,
}

impl CompletionOutcome {
    /// Whether the server confirmed this completion
    pub fn confirmed(&self) -> bool {
        self.update.source == UpdateSource::Server
    }
}

type Reply = oneshot::Sender<Result<CompletionOutcome, ProgressError>>;

struct Job {
    event: PerformanceEvent,
    reply: Reply,
}

/// Drives completions for one profile
pub struct PracticeEngine {
    store: Arc<ProgressStore>,
    submitter: Arc<dyn PerformanceSubmitter>,
    health: Option<Arc<dyn HealthCheck>>,
    clock: Arc<dyn Clock>,
    submit_timeout: Duration,
    /// Pending completions, drained in order by the worker
    jobs: OnceLock<mpsc::UnboundedSender<Job>>,
}

impl PracticeEngine {
    pub fn new(
        store: Arc<ProgressStore>,
        submitter: Arc<dyn PerformanceSubmitter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            submitter,
            health: None,
            clock,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            jobs: OnceLock::new(),
        }
    }

    pub fn with_health_check(mut self, health: Arc<dyn HealthCheck>) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<ProgressStore> {
        &self.store
    }

    pub fn current(&self) -> UserProfile {
        self.store.current()
    }

    pub fn report(&self) -> ProgressReport {
        ProgressReport::build(&self.store.current(), self.clock.today())
    }

    /// Best guess at server reachability; `false` when no check is configured
    pub async fn server_reachable(&self) -> bool {
        match &self.health {
            Some(health) => health.is_server_reachable().await,
            None => false,
        }
    }

    /// Record one completed exercise.
    ///
    /// The exercise is queued when this is called, not when the returned
    /// future is first polled, and it is applied even if that future is
    /// dropped. Must be called from within a Tokio runtime.
    ///
    /// Network and storage problems never fail a completion; the only
    /// errors are store invariant violations.
    pub fn complete(
        &self,
        event: PerformanceEvent,
    ) -> impl Future<Output = Result<CompletionOutcome, ProgressError>> + Send + 'static {
        let (reply, outcome) = oneshot::channel();
        let queued = self
            .jobs()
            .send(Job { event, reply })
            .map_err(|_| ProgressError::EngineStopped);

        async move {
            queued?;
            outcome.await.map_err(|_| ProgressError::EngineStopped)?
        }
    }

    fn jobs(&self) -> &mpsc::UnboundedSender<Job> {
        self.jobs.get_or_init(|| {
            let (sender, receiver) = mpsc::unbounded_channel();
            let worker = Worker {
                store: self.store.clone(),
                submitter: self.submitter.clone(),
                clock: self.clock.clone(),
                submit_timeout: self.submit_timeout,
            };
            tokio::spawn(worker.run(receiver));
            sender
        })
    }
}

/// Owns the completion sequence so it survives callers that stop waiting
struct Worker {
    store: Arc<ProgressStore>,
    submitter: Arc<dyn PerformanceSubmitter>,
    clock: Arc<dyn Clock>,
    submit_timeout: Duration,
}

impl Worker {
    /// Runs until the engine and every queued job are gone
    async fn run(self, mut jobs: mpsc::UnboundedReceiver<Job>) {
        while let Some(Job { event, reply }) = jobs.recv().await {
            let exercise_id = event.exercise_id;
            let outcome = self.complete(event).await;
            if reply.send(outcome).is_err() {
                log::info!("Exercise {} applied after its caller stopped waiting", exercise_id);
            }
        }
        log::debug!("Completion worker for {} stopped", self.store.current().id);
    }

    async fn complete(&self, event: PerformanceEvent) -> Result<CompletionOutcome, ProgressError> {
        let result = score(&event);
        let (before, revision) = self.store.snapshot();

        let submission = PerformanceSubmission::new(&before.id, &event, &result);
        let server = match self.submit(&submission).await {
            Ok(server) => Some(server),
            Err(e) => {
                log::warn!(
                    "Submission of exercise {} failed, keeping local progress: {}",
                    event.exercise_id,
                    e
                );
                None
            }
        };

        // Read the day after the submission returns, as the attempt ends then
        let today = self.clock.today();
        let update = reconcile(&before, revision, &event, &result, server.as_ref(), today);
        let applied = self.store.apply_update(&update)?;

        let new_milestones = newly_unlocked(&before, &applied.profile);
        for milestone in &new_milestones {
            log::info!("Milestone reached: {}", milestone.info().name);
        }

        log::info!(
            "Exercise {} complete: score {}, +{} XP ({:?}), level {}, streak {}",
            event.exercise_id,
            result.score,
            update.xp_earned,
            update.source,
            update.level,
            update.streak_days
        );

        Ok(CompletionOutcome {
            result,
            grade: ScoreGrade::from_score(result.score),
            update,
            profile: applied.profile,
            new_milestones,
            persist_error: applied.persist_error,
        })
    }

    async fn submit(&self, submission: &PerformanceSubmission) -> Result<ServerResult, SubmitError> {
        tokio::time::timeout(self.submit_timeout, self.submitter.submit_performance(submission))
            .await
            .map_err(|_| SubmitError::Timeout(self.submit_timeout))?
    }
}

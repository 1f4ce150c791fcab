//! Lookup-then-submit orchestration for exercise and challenge screens.
//!
//! A [`WorkoutSession`] lives as long as its screen. Starting a workout
//! takes the session's request gate, resolves the user id, and returns a
//! [`PreparedWorkout`] that still holds the gate; the gate is released only
//! when the run (including its submission) is over. Closing the session
//! cancels any run started from it.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{ApiClient, ChallengeSubmitter, ExerciseSubmitter, GatePass, RequestGate, UserId};
use crate::countdown::{
    Completion, CompletionSink, CountdownController, CountdownGoal, CountdownHandle,
    CountdownRunner, RunOutcome,
};
use crate::error::{ApiError, CoreError, Result};
use crate::events::Event;
use crate::exercise::ExerciseKind;

/// What a finished run is recorded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutKind {
    /// Timed exercise screen, logged to `/exercices`.
    Exercise(ExerciseKind),
    /// Pose-tracked challenge, logged to `/challenge-participations`.
    Challenge(ExerciseKind),
}

/// Submitter chosen by [`WorkoutKind`].
#[derive(Debug, Clone)]
pub enum WorkoutSink {
    Exercise(ExerciseSubmitter),
    Challenge(ChallengeSubmitter),
}

impl CompletionSink for WorkoutSink {
    async fn submit(&self, completion: &Completion) -> Result<(), ApiError> {
        match self {
            WorkoutSink::Exercise(s) => s.submit(completion).await,
            WorkoutSink::Challenge(s) => s.submit(completion).await,
        }
    }
}

pub struct WorkoutSession {
    client: ApiClient,
    gate: RequestGate,
    screen: CancellationToken,
}

impl WorkoutSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            gate: RequestGate::new(),
            screen: CancellationToken::new(),
        }
    }

    /// Whether a start is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Cancel every run started from this session.
    pub fn close(&self) {
        self.screen.cancel();
    }

    /// Resolve `email` and build a countdown ready to run.
    ///
    /// # Errors
    /// `CoreError::Busy` if another start is outstanding,
    /// `ApiError::UserNotFound` if the id cannot be resolved, or a
    /// validation error for an unusable goal.
    pub async fn start(
        &self,
        email: &str,
        kind: WorkoutKind,
        goal: CountdownGoal,
        tick_period: Duration,
    ) -> Result<(PreparedWorkout, CountdownHandle)> {
        let pass = self.gate.try_acquire().ok_or_else(|| CoreError::Busy {
            action: "workout start".into(),
        })?;

        let controller = CountdownController::new(goal)?;
        let user_id = self
            .client
            .resolve_user_id(email)
            .await
            .ok_or_else(|| ApiError::UserNotFound {
                email: email.to_string(),
            })?;
        debug!(%email, ?kind, "workout prepared");

        let sink = self.sink(kind, user_id);
        let (runner, handle) =
            CountdownRunner::with_cancellation(controller, tick_period, self.screen.clone());
        Ok((
            PreparedWorkout {
                runner,
                sink,
                _pass: pass,
            },
            handle,
        ))
    }

    fn sink(&self, kind: WorkoutKind, user_id: UserId) -> WorkoutSink {
        let client = self.client.clone();
        match kind {
            WorkoutKind::Exercise(k) => {
                WorkoutSink::Exercise(ExerciseSubmitter::new(client, user_id, k))
            }
            WorkoutKind::Challenge(k) => {
                WorkoutSink::Challenge(ChallengeSubmitter::new(client, user_id, k))
            }
        }
    }
}

impl Drop for WorkoutSession {
    fn drop(&mut self) {
        self.screen.cancel();
    }
}

/// A resolved workout waiting to run. Holds the session's gate.
pub struct PreparedWorkout {
    runner: CountdownRunner,
    sink: WorkoutSink,
    _pass: GatePass,
}

impl PreparedWorkout {
    pub async fn run<F: FnMut(&Event)>(self, on_event: F) -> RunOutcome {
        let PreparedWorkout {
            runner,
            sink,
            _pass,
        } = self;
        runner.run(&sink, on_event).await
    }
}

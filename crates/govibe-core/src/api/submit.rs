//! Dependent submissions: records that need a resolved user id.

use super::client::ApiClient;
use super::models::{ChallengeParticipation, ExerciseRecord, UserId};
use crate::countdown::{Completion, CompletionSink};
use crate::error::ApiError;
use crate::exercise::ExerciseKind;

/// Posts an exercise record when a timed exercise finishes.
#[derive(Debug, Clone)]
pub struct ExerciseSubmitter {
    client: ApiClient,
    user_id: UserId,
    exercise: ExerciseKind,
}

impl ExerciseSubmitter {
    pub fn new(client: ApiClient, user_id: UserId, exercise: ExerciseKind) -> Self {
        Self {
            client,
            user_id,
            exercise,
        }
    }

    pub fn record(&self, completion: &Completion) -> ExerciseRecord {
        ExerciseRecord {
            name: self.exercise.as_str().to_string(),
            user_id: self.user_id.clone(),
            duration: Some(completion.elapsed_ticks),
            repetitions: (completion.repetitions > 0).then_some(completion.repetitions),
        }
    }
}

impl CompletionSink for ExerciseSubmitter {
    async fn submit(&self, completion: &Completion) -> Result<(), ApiError> {
        self.client.log_exercise(&self.record(completion)).await
    }
}

/// Posts a challenge participation when a challenge countdown finishes.
#[derive(Debug, Clone)]
pub struct ChallengeSubmitter {
    client: ApiClient,
    user_id: UserId,
    exercise: ExerciseKind,
}

impl ChallengeSubmitter {
    pub fn new(client: ApiClient, user_id: UserId, exercise: ExerciseKind) -> Self {
        Self {
            client,
            user_id,
            exercise,
        }
    }

    pub fn participation(&self, completion: &Completion) -> ChallengeParticipation {
        ChallengeParticipation {
            user_id: self.user_id.clone(),
            repetitions: completion.repetitions,
            exercise: self.exercise.as_str().to_string(),
            duration: completion.elapsed_ticks,
        }
    }
}

impl CompletionSink for ChallengeSubmitter {
    async fn submit(&self, completion: &Completion) -> Result<(), ApiError> {
        self.client
            .join_challenge(&self.participation(completion))
            .await
    }
}

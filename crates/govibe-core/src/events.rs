//! Events emitted by countdown runs, submissions and screen changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::countdown::{CompletionReason, CountdownState};
use crate::flow::Screen;

/// Every state change in the system produces an Event.
/// The CLI prints them as JSON lines; front ends render from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        run_id: Uuid,
        duration_ticks: u32,
        target_repetitions: Option<u32>,
        at: DateTime<Utc>,
    },
    RepetitionCounted {
        run_id: Uuid,
        repetitions: u32,
        target_repetitions: Option<u32>,
        at: DateTime<Utc>,
    },
    /// Emitted exactly once per countdown run.
    CountdownCompleted {
        run_id: Uuid,
        reason: CompletionReason,
        elapsed_ticks: u32,
        repetitions: u32,
        at: DateTime<Utc>,
    },
    /// The owning screen went away before completion; nothing is submitted.
    CountdownCancelled {
        run_id: Uuid,
        elapsed_ticks: u32,
        repetitions: u32,
        at: DateTime<Utc>,
    },
    CountdownSnapshot {
        run_id: Uuid,
        state: CountdownState,
        elapsed_ticks: u32,
        remaining_ticks: u32,
        repetitions: u32,
        target_repetitions: Option<u32>,
        at: DateTime<Utc>,
    },
    SubmissionSucceeded {
        run_id: Uuid,
        at: DateTime<Utc>,
    },
    SubmissionFailed {
        run_id: Uuid,
        error: String,
        at: DateTime<Utc>,
    },
    /// The pose widget reported a badly performed movement.
    FormWarning {
        message: String,
        at: DateTime<Utc>,
    },
    ScreenChanged {
        from: Screen,
        to: Screen,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether this event ends a countdown run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Event::CountdownCompleted { .. } | Event::CountdownCancelled { .. }
        )
    }
}

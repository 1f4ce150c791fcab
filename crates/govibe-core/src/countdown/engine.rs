//! Countdown controller implementation.
//!
//! The controller is a tick-driven state machine for one exercise attempt.
//! It does not use internal threads - the owner calls `tick()` once per time
//! unit and `record_repetition()` / `observe_count()` when the pose widget
//! reports progress.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Completed
//! ```
//!
//! `Completed` is terminal: a new attempt needs a new controller. The
//! transition into `Completed` returns the only `CountdownCompleted` event
//! the controller will ever produce, which is what limits a run to a single
//! submission.
//!
//! ## Usage
//!
//! ```ignore
//! let mut countdown = CountdownController::new(CountdownGoal::timed(10))?;
//! countdown.start();
//! // Once per second:
//! if let Some(event) = countdown.tick() { /* completed */ }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Running,
    Completed,
}

/// Why a countdown finished. Exactly one is recorded per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    GoalMet,
    TimeExpired,
}

impl CompletionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionReason::GoalMet => "goal met",
            CompletionReason::TimeExpired => "time expired",
        }
    }
}

/// What ends the countdown: a tick budget and an optional repetition target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownGoal {
    pub duration_ticks: u32,
    pub target_repetitions: Option<u32>,
}

impl CountdownGoal {
    /// Runs for a fixed number of ticks.
    pub fn timed(duration_ticks: u32) -> Self {
        Self {
            duration_ticks,
            target_repetitions: None,
        }
    }

    /// Ends at `repetitions` or after `duration_ticks`, whichever is first.
    pub fn target(repetitions: u32, duration_ticks: u32) -> Self {
        Self {
            duration_ticks,
            target_repetitions: Some(repetitions),
        }
    }
}

/// Result of a finished countdown, handed to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub run_id: Uuid,
    pub reason: CompletionReason,
    pub elapsed_ticks: u32,
    pub repetitions: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownController {
    run_id: Uuid,
    goal: CountdownGoal,
    state: CountdownState,
    elapsed_ticks: u32,
    repetitions: u32,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    completion: Option<Completion>,
}

impl CountdownController {
    /// Create an idle controller.
    ///
    /// # Errors
    /// A zero tick budget or a zero repetition target is rejected.
    pub fn new(goal: CountdownGoal) -> Result<Self, ValidationError> {
        if goal.duration_ticks == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration".into(),
                message: "must be at least one tick".into(),
            });
        }
        if goal.target_repetitions == Some(0) {
            return Err(ValidationError::InvalidValue {
                field: "target".into(),
                message: "must be at least one repetition".into(),
            });
        }
        Ok(Self {
            run_id: Uuid::new_v4(),
            goal,
            state: CountdownState::Idle,
            elapsed_ticks: 0,
            repetitions: 0,
            started_at: None,
            completion: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn goal(&self) -> CountdownGoal {
        self.goal
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.goal.duration_ticks.saturating_sub(self.elapsed_ticks)
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.state == CountdownState::Completed
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::CountdownSnapshot {
            run_id: self.run_id,
            state: self.state,
            elapsed_ticks: self.elapsed_ticks,
            remaining_ticks: self.remaining_ticks(),
            repetitions: self.repetitions,
            target_repetitions: self.goal.target_repetitions,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Idle => {
                self.state = CountdownState::Running;
                self.started_at = Some(Utc::now());
                Some(Event::CountdownStarted {
                    run_id: self.run_id,
                    duration_ticks: self.goal.duration_ticks,
                    target_repetitions: self.goal.target_repetitions,
                    at: Utc::now(),
                })
            }
            CountdownState::Running | CountdownState::Completed => None,
        }
    }

    /// One time unit elapsed. Returns `Some(CountdownCompleted)` when the
    /// tick budget is used up.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.goal.duration_ticks {
            return Some(self.complete(CompletionReason::TimeExpired));
        }
        None
    }

    /// One more repetition was performed.
    pub fn record_repetition(&mut self) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.repetitions += 1;
        self.after_count_change()
    }

    /// The pose widget reported an absolute repetition count.
    ///
    /// Counts never go backwards, so repeated or late reports are no-ops.
    pub fn observe_count(&mut self, count: u32) -> Option<Event> {
        if self.state != CountdownState::Running || count <= self.repetitions {
            return None;
        }
        self.repetitions = count;
        self.after_count_change()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn after_count_change(&mut self) -> Option<Event> {
        match self.goal.target_repetitions {
            Some(target) if self.repetitions >= target => {
                Some(self.complete(CompletionReason::GoalMet))
            }
            target => Some(Event::RepetitionCounted {
                run_id: self.run_id,
                repetitions: self.repetitions,
                target_repetitions: target,
                at: Utc::now(),
            }),
        }
    }

    fn complete(&mut self, reason: CompletionReason) -> Event {
        let now = Utc::now();
        self.state = CountdownState::Completed;
        self.completion = Some(Completion {
            run_id: self.run_id,
            reason,
            elapsed_ticks: self.elapsed_ticks,
            repetitions: self.repetitions,
            started_at: self.started_at.unwrap_or(now),
            finished_at: now,
        });
        Event::CountdownCompleted {
            run_id: self.run_id,
            reason,
            elapsed_ticks: self.elapsed_ticks,
            repetitions: self.repetitions,
            at: now,
        }
    }
}

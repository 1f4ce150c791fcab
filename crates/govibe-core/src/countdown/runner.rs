//! Async driver that owns one [`CountdownController`].
//!
//! Time ticks, repetition reports from the pose widget and cancellation all
//! arrive at a single `select!` loop, so the controller only ever sees one
//! input at a time. When the controller completes, the loop stops ticking,
//! closes the input channel and hands the completion to the sink exactly
//! once.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::engine::{Completion, CountdownController};
use crate::error::ApiError;
use crate::events::Event;

/// Receives the single completion of a countdown run.
pub trait CompletionSink {
    fn submit(&self, completion: &Completion) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownInput {
    /// One more repetition.
    Repetition,
    /// Absolute repetition count.
    Count(u32),
}

/// Cloneable sender side used by external progress sources.
#[derive(Debug, Clone)]
pub struct CountdownHandle {
    tx: mpsc::UnboundedSender<CountdownInput>,
    cancel: CancellationToken,
}

impl CountdownHandle {
    /// Report one repetition. Returns `false` once the run has ended.
    pub fn repetition(&self) -> bool {
        self.tx.send(CountdownInput::Repetition).is_ok()
    }

    /// Report an absolute count. Returns `false` once the run has ended.
    pub fn observe(&self, count: u32) -> bool {
        self.tx.send(CountdownInput::Count(count)).is_ok()
    }

    /// Stop the run without submitting (the screen was closed).
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.tx.is_closed()
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Completed {
        completion: Completion,
        submission: Result<(), ApiError>,
    },
    Cancelled {
        elapsed_ticks: u32,
        repetitions: u32,
    },
}

impl RunOutcome {
    pub fn completion(&self) -> Option<&Completion> {
        match self {
            RunOutcome::Completed { completion, .. } => Some(completion),
            RunOutcome::Cancelled { .. } => None,
        }
    }
}

pub struct CountdownRunner {
    controller: CountdownController,
    tick_period: Duration,
    rx: mpsc::UnboundedReceiver<CountdownInput>,
    cancel: CancellationToken,
}

impl CountdownRunner {
    pub fn new(controller: CountdownController, tick_period: Duration) -> (Self, CountdownHandle) {
        Self::with_cancellation(controller, tick_period, CancellationToken::new())
    }

    /// Tie the run to an existing token, typically the owning screen's.
    /// Cancelling `parent` cancels the run; cancelling the run does not
    /// cancel `parent`.
    pub fn with_cancellation(
        controller: CountdownController,
        tick_period: Duration,
        parent: CancellationToken,
    ) -> (Self, CountdownHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = parent.child_token();
        let handle = CountdownHandle {
            tx,
            cancel: cancel.clone(),
        };
        let runner = Self {
            controller,
            tick_period,
            rx,
            cancel,
        };
        (runner, handle)
    }

    /// Drive the countdown to completion or cancellation.
    ///
    /// `on_event` sees every event in order, including the submission
    /// result.
    pub async fn run<S, F>(mut self, sink: &S, mut on_event: F) -> RunOutcome
    where
        S: CompletionSink,
        F: FnMut(&Event),
    {
        let run_id = self.controller.run_id();
        if let Some(event) = self.controller.start() {
            on_event(&event);
        }

        let mut ticker = tokio::time::interval_at(Instant::now() + self.tick_period, self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut inputs_open = true;

        let completion = loop {
            let event = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    self.rx.close();
                    debug!(%run_id, "countdown cancelled");
                    let event = Event::CountdownCancelled {
                        run_id,
                        elapsed_ticks: self.controller.elapsed_ticks(),
                        repetitions: self.controller.repetitions(),
                        at: Utc::now(),
                    };
                    on_event(&event);
                    return RunOutcome::Cancelled {
                        elapsed_ticks: self.controller.elapsed_ticks(),
                        repetitions: self.controller.repetitions(),
                    };
                }
                input = self.rx.recv(), if inputs_open => match input {
                    Some(CountdownInput::Repetition) => self.controller.record_repetition(),
                    Some(CountdownInput::Count(n)) => self.controller.observe_count(n),
                    None => {
                        inputs_open = false;
                        None
                    }
                },
                _ = ticker.tick() => self.controller.tick(),
            };

            if let Some(event) = event {
                on_event(&event);
            }
            if let Some(completion) = self.controller.completion() {
                break completion.clone();
            }
        };

        // Late reports are dropped, not queued.
        self.rx.close();
        debug!(%run_id, reason = completion.reason.as_str(), "countdown completed");

        let submission = sink.submit(&completion).await;
        let event = match &submission {
            Ok(()) => {
                info!(%run_id, "completion submitted");
                Event::SubmissionSucceeded {
                    run_id,
                    at: Utc::now(),
                }
            }
            Err(err) => {
                warn!(%run_id, error = %err, "completion submission failed");
                Event::SubmissionFailed {
                    run_id,
                    error: err.to_string(),
                    at: Utc::now(),
                }
            }
        };
        on_event(&event);

        RunOutcome::Completed {
            completion,
            submission,
        }
    }
}

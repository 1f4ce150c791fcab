use std::time::Duration;

use clap::Subcommand;
use govibe_core::countdown::{CountdownGoal, RunOutcome};
use govibe_core::{Config, ExerciseKind, WorkoutKind, WorkoutSession};

use super::{client, print_json, runtime, CmdResult};

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// List available exercises
    List {
        #[arg(long)]
        json: bool,
    },
    /// Run a timed exercise and log it
    Start {
        /// squat, pushup, running or yoga
        kind: ExerciseKind,
        #[arg(long)]
        email: String,
        /// Length in ticks (defaults to countdown.exercise_duration_secs)
        #[arg(long)]
        duration: Option<u32>,
    },
}

pub fn run(action: ExerciseAction) -> CmdResult {
    match action {
        ExerciseAction::List { json } => {
            if json {
                let list: Vec<_> = ExerciseKind::ALL
                    .iter()
                    .map(|k| {
                        serde_json::json!({
                            "name": k.as_str(),
                            "label": k.label(),
                            "pose_tracking": k.supports_pose_tracking(),
                        })
                    })
                    .collect();
                return print_json(&list);
            }
            for kind in ExerciseKind::ALL {
                let note = if kind.supports_pose_tracking() {
                    "  (pose tracked)"
                } else {
                    ""
                };
                println!("{:<8} {}{note}", kind.as_str(), kind.label());
            }
        }
        ExerciseAction::Start {
            kind,
            email,
            duration,
        } => {
            let config = Config::load()?;
            let goal =
                CountdownGoal::timed(duration.unwrap_or(config.countdown.exercise_duration_secs));
            let tick = Duration::from_millis(config.countdown.tick_ms);
            let session = WorkoutSession::new(client(&config)?);

            let outcome = runtime()?.block_on(async {
                let (workout, _handle) = session
                    .start(&email, WorkoutKind::Exercise(kind), goal, tick)
                    .await?;
                Ok::<_, govibe_core::CoreError>(
                    workout
                        .run(|event| {
                            if let Ok(line) = serde_json::to_string(event) {
                                println!("{line}");
                            }
                        })
                        .await,
                )
            })?;
            finish(outcome)?;
        }
    }
    Ok(())
}

/// Turn a failed submission into a command failure.
pub(crate) fn finish(outcome: RunOutcome) -> CmdResult {
    match outcome {
        RunOutcome::Completed {
            submission: Err(err),
            ..
        } => Err(err.into()),
        RunOutcome::Completed { .. } => Ok(()),
        RunOutcome::Cancelled { .. } => Err("countdown cancelled".into()),
    }
}

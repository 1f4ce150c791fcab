use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use govibe_core::countdown::CountdownGoal;
use govibe_core::pose::{self, PoseMessage, FORM_WARNING_TEXT};
use govibe_core::{Config, Difficulty, Event, ExerciseKind, WorkoutKind, WorkoutSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::exercise::finish;
use super::{client, runtime, CmdResult};

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// Print the pose-tracking widget URL
    Url {
        #[arg(long, default_value = "squat")]
        exercise: ExerciseKind,
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
    },
    /// Run a challenge fed by pose widget messages on stdin
    Start {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "squat")]
        exercise: ExerciseKind,
        /// Repetitions to reach (defaults to countdown.challenge_target_repetitions)
        #[arg(long)]
        target: Option<u32>,
        /// Length in ticks (defaults to countdown.challenge_duration_secs)
        #[arg(long)]
        duration: Option<u32>,
    },
}

pub fn run(action: ChallengeAction) -> CmdResult {
    let config = Config::load()?;
    match action {
        ChallengeAction::Url {
            exercise,
            difficulty,
        } => {
            let url = pose::tracking_url(&config.pose_tracker, exercise, difficulty)?;
            println!("{url}");
        }
        ChallengeAction::Start {
            email,
            exercise,
            target,
            duration,
        } => {
            if !exercise.supports_pose_tracking() {
                return Err(format!("{} cannot be pose-tracked", exercise.label()).into());
            }
            let goal = CountdownGoal::target(
                target.unwrap_or(config.countdown.challenge_target_repetitions),
                duration.unwrap_or(config.countdown.challenge_duration_secs),
            );
            let tick = Duration::from_millis(config.countdown.tick_ms);
            let session = WorkoutSession::new(client(&config)?);

            let rt = runtime()?;
            let outcome = rt.block_on(async {
                let (workout, handle) = session
                    .start(&email, WorkoutKind::Challenge(exercise), goal, tick)
                    .await?;

                let reader = tokio::spawn(async move {
                    let mut lines = BufReader::new(tokio::io::stdin()).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        match PoseMessage::parse(&line) {
                            PoseMessage::Counter(n) => {
                                if !handle.observe(n) {
                                    break;
                                }
                            }
                            PoseMessage::FormWarning(raw) => {
                                debug!(%raw, "form warning");
                                emit(&Event::FormWarning {
                                    message: FORM_WARNING_TEXT.to_string(),
                                    at: Utc::now(),
                                });
                            }
                            PoseMessage::CameraDenied => {
                                eprintln!("camera access denied");
                                handle.cancel();
                                break;
                            }
                            other => debug!(?other, "pose message"),
                        }
                    }
                });

                let outcome = workout.run(emit).await;
                reader.abort();
                Ok::<_, govibe_core::CoreError>(outcome)
            });
            // The stdin reader may still be parked in a blocking read.
            rt.shutdown_background();
            finish(outcome?)?;
        }
    }
    Ok(())
}

fn emit(event: &Event) {
    if let Ok(line) = serde_json::to_string(event) {
        println!("{line}");
    }
}

//! # GoVibe Core Library
//!
//! This library holds the behavior behind the GoVibe fitness app screens:
//! everything that is not layout. The `govibe` CLI drives it directly and
//! any graphical front end is meant to be a thin layer over the same calls.
//!
//! ## Architecture
//!
//! - **Validation**: pure rules for email, password, name and OTP fields
//! - **API**: one typed client for the backend, with a single configured
//!   base URL, plus the submitters for dependent records
//! - **Countdown**: a tick-driven state machine per exercise attempt and an
//!   async runner that serializes its inputs and submits exactly once
//! - **Pose**: parsing of messages from the hosted pose-tracking widget
//! - **Flow**: the screen graph as one transition function
//!
//! ## Key Components
//!
//! - [`ApiClient`]: backend access, including identity resolution
//! - [`CountdownController`]: countdown state machine
//! - [`CountdownRunner`]: single owner of a running countdown
//! - [`WorkoutSession`]: lookup-then-submit orchestration for one screen
//! - [`Config`]: application configuration management

pub mod api;
pub mod config;
pub mod countdown;
pub mod error;
pub mod events;
pub mod exercise;
pub mod flow;
pub mod leaderboard;
pub mod pose;
pub mod validation;
pub mod workout;

pub use api::{ApiClient, RequestGate, UserId};
pub use config::Config;
pub use countdown::{
    Completion, CompletionReason, CompletionSink, CountdownController, CountdownGoal,
    CountdownHandle, CountdownRunner, CountdownState, RunOutcome,
};
pub use error::{ApiError, ConfigError, CoreError, FlowError, ValidationError};
pub use events::Event;
pub use exercise::{Difficulty, ExerciseKind};
pub use flow::{Flow, FlowEvent, Screen};
pub use pose::PoseMessage;
pub use validation::PasswordPolicy;
pub use workout::{WorkoutKind, WorkoutSession};

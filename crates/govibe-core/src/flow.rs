//! Screen flow.
//!
//! The app is a directed graph of screens. Each edge fires on one
//! [`FlowEvent`], usually the success of the previous screen's request.
//! [`transition`] is the whole graph; [`Flow`] tracks the current screen.
//!
//! ```text
//! SignUp -> Login -> Home -> Exercise(k) -> Countdown(k) -> Result(k) -> Home
//!             |        |-> Profile -> (deleted) Login
//!             |        `-> Challenge <-> PoseTracker
//!             |                 `<-> Leaderboard
//!             `-> ConfirmEmail -> Otp -> ResetPassword -> Login
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FlowError;
use crate::events::Event;
use crate::exercise::ExerciseKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "exercise", rename_all = "snake_case")]
pub enum Screen {
    SignUp,
    Login,
    ConfirmEmail,
    Otp,
    ResetPassword,
    Home,
    Profile,
    Exercise(ExerciseKind),
    Countdown(ExerciseKind),
    Result(ExerciseKind),
    Challenge,
    PoseTracker,
    Leaderboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowEvent {
    SignedUp,
    HaveAccount,
    CreateAccount,
    LoggedIn,
    ForgotPassword,
    CodeSent,
    CodeVerified,
    PasswordReset,
    OpenProfile,
    AccountDeleted,
    PickExercise(ExerciseKind),
    StartCountdown,
    CountdownFinished,
    OpenChallenge,
    StartChallenge,
    FormWarningDismissed,
    OpenLeaderboard,
    Back,
}

/// The screen graph.
pub fn transition(from: Screen, event: FlowEvent) -> Result<Screen, FlowError> {
    use FlowEvent as E;
    use Screen as S;

    let to = match (from, event) {
        (S::SignUp, E::SignedUp | E::HaveAccount) => S::Login,

        (S::Login, E::LoggedIn) => S::Home,
        (S::Login, E::CreateAccount) => S::SignUp,
        (S::Login, E::ForgotPassword) => S::ConfirmEmail,

        (S::ConfirmEmail, E::CodeSent) => S::Otp,
        (S::ConfirmEmail, E::Back) => S::Login,
        (S::Otp, E::CodeVerified) => S::ResetPassword,
        (S::Otp, E::Back) => S::ConfirmEmail,
        (S::ResetPassword, E::PasswordReset) => S::Login,

        (S::Home, E::OpenProfile) => S::Profile,
        (S::Profile, E::AccountDeleted) => S::Login,
        (S::Profile, E::Back) => S::Home,

        (S::Home, E::PickExercise(k)) => S::Exercise(k),
        (S::Exercise(k), E::StartCountdown) => S::Countdown(k),
        (S::Exercise(_), E::Back) => S::Home,
        (S::Countdown(k), E::CountdownFinished) => S::Result(k),
        (S::Countdown(k), E::Back) => S::Exercise(k),
        (S::Result(_), E::Back) => S::Home,

        (S::Home, E::OpenChallenge) => S::Challenge,
        (S::Challenge, E::StartChallenge) => S::PoseTracker,
        (S::PoseTracker, E::FormWarningDismissed | E::CountdownFinished | E::Back) => S::Challenge,
        (S::Challenge, E::OpenLeaderboard) => S::Leaderboard,
        (S::Leaderboard, E::Back) => S::Challenge,
        (S::Challenge, E::Back) => S::Home,

        _ => return Err(FlowError::InvalidTransition { from, event }),
    };
    Ok(to)
}

/// Current position in the screen graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    current: Screen,
}

impl Default for Flow {
    fn default() -> Self {
        Self::new(Screen::SignUp)
    }
}

impl Flow {
    pub fn new(start: Screen) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Apply one event. The screen is unchanged when the edge does not exist.
    pub fn apply(&mut self, event: FlowEvent) -> Result<Event, FlowError> {
        let from = self.current;
        let to = transition(from, event)?;
        debug!(?from, ?to, ?event, "screen transition");
        self.current = to;
        Ok(Event::ScreenChanged {
            from,
            to,
            at: Utc::now(),
        })
    }
}

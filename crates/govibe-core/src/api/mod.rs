//! Backend access: the typed HTTP client, wire models, dependent
//! submitters and the single-flight request gate.

mod client;
mod gate;
pub mod models;
mod submit;

pub use client::ApiClient;
pub use gate::{GatePass, RequestGate};
pub use models::{
    ChallengeParticipation, ExerciseRecord, LoginRequest, Participant, ParticipantUser,
    ProfileUpdate, SignupRequest, UserId, UserProfile,
};
pub use submit::{ChallengeSubmitter, ExerciseSubmitter};

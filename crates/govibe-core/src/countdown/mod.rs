mod engine;
mod runner;

pub use engine::{
    Completion, CompletionReason, CountdownController, CountdownGoal, CountdownState,
};
pub use runner::{
    CompletionSink, CountdownHandle, CountdownInput, CountdownRunner, RunOutcome,
};

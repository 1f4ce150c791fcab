pub mod auth;
pub mod challenge;
pub mod config;
pub mod exercise;
pub mod leaderboard;
pub mod profile;
pub mod validate;

use govibe_core::{ApiClient, Config, ValidationError};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Runtime for the network calls of one command.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

pub fn client(config: &Config) -> Result<ApiClient, Box<dyn std::error::Error>> {
    Ok(ApiClient::from_config(&config.effective_api()?)?)
}

/// Print every field message and fail the command.
pub fn reject(errors: Vec<ValidationError>) -> CmdResult {
    for err in &errors {
        eprintln!("{}: {err}", err.field());
    }
    Err(format!("{} invalid field(s)", errors.len()).into())
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

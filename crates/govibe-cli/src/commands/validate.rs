use clap::Subcommand;
use govibe_core::validation::{self, PasswordPolicy};
use govibe_core::Config;

use super::{reject, CmdResult};

#[derive(Subcommand)]
pub enum ValidateAction {
    /// Check an email address
    Email { email: String },
    /// Check a password against a policy
    Password {
        password: String,
        /// strict or lenient (defaults to validation.password_policy)
        #[arg(long)]
        policy: Option<PasswordPolicy>,
    },
}

pub fn run(action: ValidateAction) -> CmdResult {
    let result = match action {
        ValidateAction::Email { email } => validation::check_email(&email),
        ValidateAction::Password { password, policy } => {
            let policy = match policy {
                Some(policy) => policy,
                None => Config::load()?.validation.password_policy,
            };
            validation::check_password(&password, policy)
        }
    };
    match result {
        Ok(()) => {
            println!("valid");
            Ok(())
        }
        Err(err) => reject(vec![err]),
    }
}

use clap::Subcommand;
use govibe_core::api::{LoginRequest, SignupRequest};
use govibe_core::validation::{self, LoginForm, ResetForm, SignupForm};
use govibe_core::Config;

use super::{client, reject, runtime, CmdResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check credentials
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Email a one-time code for a password reset
    SendCode {
        #[arg(long)]
        email: String,
    },
    /// Verify a one-time code
    Verify {
        #[arg(long)]
        email: String,
        /// Code received by email
        #[arg(long)]
        otp: String,
    },
    /// Set a new password after a verified code
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
}

pub fn run(action: AuthAction) -> CmdResult {
    let config = Config::load()?;
    let policy = config.validation.password_policy;
    let api = client(&config)?;
    let rt = runtime()?;

    match action {
        AuthAction::Signup {
            first_name,
            last_name,
            email,
            password,
        } => {
            let form = SignupForm {
                first_name,
                last_name,
                email,
                password,
            };
            if let Err(errors) = form.validate(policy) {
                return reject(errors);
            }
            let request = SignupRequest {
                first_name: form.first_name,
                last_name: form.last_name,
                email: form.email,
                password: form.password,
            };
            rt.block_on(api.signup(&request))?;
            println!("account created for {}", request.email);
        }
        AuthAction::Login { email, password } => {
            let form = LoginForm { email, password };
            if let Err(errors) = form.validate(policy) {
                return reject(errors);
            }
            rt.block_on(api.login(&LoginRequest {
                email: form.email.clone(),
                password: form.password,
            }))?;
            println!("logged in as {}", form.email);
        }
        AuthAction::SendCode { email } => {
            if let Err(err) = validation::check_email(&email) {
                return reject(vec![err]);
            }
            rt.block_on(api.send_verification_code(&email))?;
            println!("verification code sent to {email}");
        }
        AuthAction::Verify { email, otp } => {
            let errors: Vec<_> = [validation::check_email(&email), validation::check_otp(&otp)]
                .into_iter()
                .filter_map(Result::err)
                .collect();
            if !errors.is_empty() {
                return reject(errors);
            }
            rt.block_on(api.verify_code(&email, &otp))?;
            println!("code verified");
        }
        AuthAction::ResetPassword {
            email,
            password,
            confirm,
        } => {
            let form = ResetForm {
                email,
                password,
                confirm_password: confirm,
            };
            if let Err(errors) = form.validate(policy) {
                return reject(errors);
            }
            rt.block_on(api.reset_password(&form.email, &form.password))?;
            println!("password updated");
        }
    }
    Ok(())
}

use clap::Subcommand;
use govibe_core::api::ProfileUpdate;
use govibe_core::validation;
use govibe_core::Config;

use super::{client, print_json, reject, runtime, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the account stored for an email
    Show {
        #[arg(long)]
        email: String,
    },
    /// Change names or email
    Update {
        /// Current email
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        new_email: Option<String>,
    },
    /// Delete the account
    Delete {
        #[arg(long)]
        email: String,
        /// Required; deletion cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: ProfileAction) -> CmdResult {
    let config = Config::load()?;
    let api = client(&config)?;
    let rt = runtime()?;

    match action {
        ProfileAction::Show { email } => {
            let user = rt.block_on(api.fetch_user(&email))?;
            print_json(&user)?;
        }
        ProfileAction::Update {
            email,
            first_name,
            last_name,
            new_email,
        } => {
            let current = rt.block_on(api.fetch_user(&email))?;
            let update = ProfileUpdate {
                last_name: last_name.unwrap_or(current.last_name),
                first_name: first_name.unwrap_or(current.first_name),
                email: new_email.unwrap_or(current.email),
            };
            let errors: Vec<_> = [
                validation::check_name("First name", &update.first_name),
                validation::check_name("Last name", &update.last_name),
                validation::check_email(&update.email),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect();
            if !errors.is_empty() {
                return reject(errors);
            }
            rt.block_on(api.update_profile(current.id.as_str(), &update))?;
            println!("profile updated");
        }
        ProfileAction::Delete { email, yes } => {
            if !yes {
                return Err("refusing to delete without --yes".into());
            }
            let id = rt.block_on(api.delete_account(&email))?;
            println!("account {id} deleted");
        }
    }
    Ok(())
}

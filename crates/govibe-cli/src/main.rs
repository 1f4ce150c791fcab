use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "govibe", version, about = "GoVibe fitness CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account creation, login and password reset
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Show, edit or delete an account
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Timed exercises
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// Pose-tracked challenges
    Challenge {
        #[command(subcommand)]
        action: commands::challenge::ChallengeAction,
    },
    /// Challenge leaderboard
    Leaderboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Check form values offline
    Validate {
        #[command(subcommand)]
        action: commands::validate::ValidateAction,
    },
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Exercise { action } => commands::exercise::run(action),
        Commands::Challenge { action } => commands::challenge::run(action),
        Commands::Leaderboard { json } => commands::leaderboard::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Validate { action } => commands::validate::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "govibe", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

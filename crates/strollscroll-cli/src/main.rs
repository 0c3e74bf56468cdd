use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "strollscroll-cli", version, about = "StrollScroll CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed step readings into the reward engine
    Steps {
        #[command(subcommand)]
        action: commands::steps::StepsAction,
    },
    /// Streaks, quests, challenges, achievements and credits
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Per-app restrictions and PIN
    Restrictions {
        #[command(subcommand)]
        action: commands::restrictions::RestrictionsAction,
    },
    /// First-run questionnaire
    Onboarding {
        #[command(subcommand)]
        action: commands::onboarding::OnboardingAction,
    },
    /// Mini-game results
    Minigame {
        #[command(subcommand)]
        action: commands::minigame::MinigameAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("STROLLSCROLL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Steps { action } => commands::steps::run(action),
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Restrictions { action } => commands::restrictions::run(action),
        Commands::Onboarding { action } => commands::onboarding::run(action),
        Commands::Minigame { action } => commands::minigame::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

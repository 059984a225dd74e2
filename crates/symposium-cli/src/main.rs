//! Symposium CLI - run multi-agent LLM debates from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Run one phase (or the whole debate if the config sets "auto")
//! symposium run --config debate.json --topic "Is nuclear power green?"
//!
//! # Continue a saved debate with new evidence
//! symposium resume --session debate_20250101_120000.json --evidence "IPCC AR6 ch. 6"
//!
//! # Inspect a saved debate
//! symposium show --session debate_20250101_120000.json
//!
//! # Stop a saved debate so later resumes do nothing
//! symposium stop --session debate_20250101_120000.json
//!
//! # List completion providers and their configuration status
//! symposium providers
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;
mod display;

use commands::{providers, resume, run, show, stop};

/// Symposium - structured debates between language models
#[derive(Parser)]
#[command(
    name = "symposium",
    version,
    about = "Symposium CLI - Multi-agent LLM debates",
    long_about = "Symposium runs position, critique and defense rounds between\n\
                  language-model agents and asks a judge model to score each round."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new debate from a configuration file
    #[command(name = "run")]
    Run(run::RunArgs),

    /// Continue a saved debate
    #[command(name = "resume")]
    Resume(resume::ResumeArgs),

    /// Print a saved debate
    #[command(name = "show")]
    Show(show::ShowArgs),

    /// Stop a saved debate
    #[command(name = "stop")]
    Stop(stop::StopArgs),

    /// List completion providers
    #[command(name = "providers")]
    Providers(providers::ProvidersArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run::run(args).await,
        Commands::Resume(args) => resume::run(args).await,
        Commands::Show(args) => show::run(args).await,
        Commands::Stop(args) => stop::run(args).await,
        Commands::Providers(args) => providers::run(args),
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}

/// Print a success message with a checkmark
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

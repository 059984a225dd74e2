//! Show command - Print a saved debate
//!
//! Usage:
//! ```bash
//! symposium show --session debate_20250101_120000.json
//! symposium show --session debate.json --json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use symposium_debate::SessionStore;

use super::Offline;
use crate::display;

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    /// Saved session to print
    #[arg(long, short = 's', value_name = "FILE")]
    session: PathBuf,

    /// Print the raw session document instead
    #[arg(long)]
    json: bool,
}

/// Run the show command
pub async fn run(args: ShowArgs) -> Result<()> {
    let document = SessionStore::current_dir()
        .load(&args.session)
        .await
        .with_context(|| format!("Failed to load session {}", args.session.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    let debate = document
        .restore(&Offline)
        .context("Failed to restore the debate")?;

    display::print_header(&debate);
    if let Some(topic) = debate.topic() {
        println!("{} {}", "Topic:".bold(), topic);
        println!();
    }
    display::print_transcripts(&debate);

    if debate.history().is_empty() {
        crate::print_info("No verdicts yet.");
    }
    for record in debate.history() {
        display::print_verdict(record);
    }
    display::print_status(&debate);
    Ok(())
}

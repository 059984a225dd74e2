//! Resume command - Continue a saved debate
//!
//! Usage:
//! ```bash
//! symposium resume --session debate_20250101_120000.json
//! symposium resume --session debate.json --evidence "New census data (2024)"
//! ```

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use symposium_debate::SessionStore;
use symposium_llm::ProviderRegistry;

use crate::display;

/// Arguments for the resume command
#[derive(Args)]
pub struct ResumeArgs {
    /// Saved session to continue; it is updated in place
    #[arg(long, short = 's', value_name = "FILE")]
    session: PathBuf,

    /// Topic to debate (default: the topic saved with the session)
    #[arg(long, short = 't')]
    topic: Option<String>,

    /// Evidence shared with every agent, placed before the topic
    #[arg(long, short = 'e')]
    evidence: Option<String>,

    /// Phase budget when the configuration enables auto mode
    #[arg(long, default_value_t = super::DEFAULT_MAX_PHASES)]
    max_phases: usize,
}

/// Run the resume command
pub async fn run(args: ResumeArgs) -> Result<()> {
    let document = SessionStore::current_dir()
        .load(&args.session)
        .await
        .with_context(|| format!("Failed to load session {}", args.session.display()))?;

    tracing::info!(
        session = %args.session.display(),
        verdicts = document.history.len(),
        "Resuming session"
    );

    let registry = ProviderRegistry::from_env();
    let mut debate = document
        .restore(&registry)
        .context("Failed to restore the debate")?;
    display::print_header(&debate);

    if debate.is_stopped() {
        crate::print_warning("This debate has already stopped; nothing to do.");
        display::print_status(&debate);
        return Ok(());
    }

    let topic = match args.topic.as_deref().or(debate.topic()) {
        Some(topic) => topic.to_string(),
        None => bail!("The session has no saved topic; pass one with --topic"),
    };
    let topic = super::with_evidence(&topic, args.evidence.as_deref());

    let executed = super::drive(&mut debate, &topic, args.max_phases).await;
    let saved = super::save(&debate, Some(args.session.as_path())).await?;
    let executed = executed?;

    display::print_status(&debate);
    crate::print_success(&format!(
        "{} phase(s) run, session saved to {}",
        executed,
        saved.display()
    ));
    Ok(())
}

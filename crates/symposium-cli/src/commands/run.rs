//! Run command - Start a new debate
//!
//! Usage:
//! ```bash
//! symposium run --config debate.json --topic "Is nuclear power green?"
//! symposium run -c debate.json -t "Is nuclear power green?" --max-phases 6 --save nuclear.json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use symposium_debate::{DebateConfig, DebateOrchestrator};
use symposium_llm::ProviderRegistry;

use crate::display;

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Debate configuration (JSON)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: PathBuf,

    /// Question or claim to debate
    #[arg(long, short = 't')]
    topic: String,

    /// Evidence shared with every agent, placed before the topic
    #[arg(long, short = 'e')]
    evidence: Option<String>,

    /// Phase budget when the configuration enables auto mode
    #[arg(long, default_value_t = super::DEFAULT_MAX_PHASES)]
    max_phases: usize,

    /// Where to save the session (default: debate_<timestamp>.json)
    #[arg(long, short = 's', value_name = "FILE")]
    save: Option<PathBuf>,
}

/// Run the run command
pub async fn run(args: RunArgs) -> Result<()> {
    let config = DebateConfig::from_json_file(&args.config)
        .await
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    tracing::info!(
        config = %args.config.display(),
        agents = config.agents_cfg.len(),
        auto = config.auto,
        "Loaded debate configuration"
    );

    let registry = ProviderRegistry::from_env();
    registry
        .config()
        .validate()
        .context("Invalid provider configuration")?;

    let mut debate =
        DebateOrchestrator::new(config, &registry).context("Failed to set up the debate")?;
    display::print_header(&debate);

    let topic = super::with_evidence(&args.topic, args.evidence.as_deref());
    let executed = super::drive(&mut debate, &topic, args.max_phases).await;

    // Keep whatever completed, even if a later phase failed
    let saved = super::save(&debate, args.save.as_deref()).await?;
    let executed = executed?;

    display::print_status(&debate);
    crate::print_success(&format!(
        "{} phase(s) run, session saved to {}",
        executed,
        saved.display()
    ));
    Ok(())
}

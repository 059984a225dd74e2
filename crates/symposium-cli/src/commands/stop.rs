//! Stop command - Mark a saved debate as finished
//!
//! Usage:
//! ```bash
//! symposium stop --session debate_20250101_120000.json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use symposium_debate::{DebateOrchestrator, SessionStore};

use super::Offline;
use crate::display;

/// Arguments for the stop command
#[derive(Args)]
pub struct StopArgs {
    /// Saved session to stop; it is updated in place
    #[arg(long, short = 's', value_name = "FILE")]
    session: PathBuf,
}

/// Load a session, stop it and write it back
///
/// A session that already stopped keeps its original reason.
pub async fn stop_session(path: &Path) -> Result<DebateOrchestrator> {
    let store = SessionStore::current_dir();
    let document = store
        .load(path)
        .await
        .with_context(|| format!("Failed to load session {}", path.display()))?;

    let mut debate = document
        .restore(&Offline)
        .context("Failed to restore the debate")?;
    debate.stop();

    store
        .save(path, &debate)
        .await
        .context("Failed to save session")?;
    Ok(debate)
}

/// Run the stop command
pub async fn run(args: StopArgs) -> Result<()> {
    let debate = stop_session(&args.session).await?;

    display::print_status(&debate);
    crate::print_success(&format!("Session {} stopped", args.session.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use symposium_debate::StopReason;

    #[tokio::test]
    async fn test_stop_persists_manual_reason() {
        let dir = tempfile::tempdir().unwrap();
        let path = super::super::write_sample_session(dir.path()).await;

        let debate = stop_session(&path).await.unwrap();
        assert_eq!(debate.stop_reason(), Some(StopReason::Manual));

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["state"]["stopped"], true);
        assert_eq!(saved["state"]["stop_reason"], "manual");
        assert_eq!(saved["state"]["phase"], "critique");
        assert_eq!(saved["agents"][0]["provider"], "mock");
        assert_eq!(saved["agents"][0]["transcript"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stopping_twice_keeps_first_reason() {
        let dir = tempfile::tempdir().unwrap();
        let path = super::super::write_sample_session(dir.path()).await;

        stop_session(&path).await.unwrap();
        let debate = stop_session(&path).await.unwrap();
        assert_eq!(debate.stop_reason(), Some(StopReason::Manual));
    }
}

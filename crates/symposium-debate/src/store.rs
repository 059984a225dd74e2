//! File-based session persistence
//!
//! Sessions are written as pretty-printed JSON, one debate per file.

use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::DebateError;
use crate::orchestrator::DebateOrchestrator;
use crate::session::SessionDocument;

/// Reads and writes session documents under a base directory
///
/// Relative paths resolve against the base directory; absolute paths are
/// used as given.
#[derive(Debug, Clone)]
pub struct SessionStore {
    base_dir: PathBuf,
}

impl SessionStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// A store rooted at the working directory
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File name for a new session, e.g. `debate_20250101_120000.json`
    pub fn default_file_name() -> String {
        format!("debate_{}.json", Local::now().format("%Y%m%d_%H%M%S"))
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Write the orchestrator's session to `path`, creating parent directories
    ///
    /// Returns the path actually written.
    pub async fn save(
        &self,
        path: impl AsRef<Path>,
        orchestrator: &DebateOrchestrator,
    ) -> Result<PathBuf, DebateError> {
        let target = self.resolve(path);
        let json = SessionDocument::capture(orchestrator).to_json_pretty()?;

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&target, json).await?;

        tracing::info!(path = %target.display(), "Session saved");
        Ok(target)
    }

    /// Save under a fresh timestamped file name
    pub async fn save_new(
        &self,
        orchestrator: &DebateOrchestrator,
    ) -> Result<PathBuf, DebateError> {
        self.save(Self::default_file_name(), orchestrator).await
    }

    /// Read a session document from `path`
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<SessionDocument, DebateError> {
        let target = self.resolve(path);
        let content = fs::read_to_string(&target).await?;
        let document = SessionDocument::from_json_str(&content)?;
        tracing::debug!(
            path = %target.display(),
            agents = document.agents.len(),
            verdicts = document.history.len(),
            "Session loaded"
        );
        Ok(document)
    }
}

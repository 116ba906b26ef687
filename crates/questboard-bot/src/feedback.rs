//! Append-only feedback log.

use std::path::{Path, PathBuf};

use questboard_core::error::DomainError;
use questboard_router::outcome::FeedbackEntry;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// Plain-text file the operators read feedback from.
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    /// Creates a log writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the file cannot be written.
    #[instrument(skip(self, entry), fields(user = %entry.user))]
    pub async fn append(&self, entry: &FeedbackEntry) -> Result<(), DomainError> {
        let io_err = |e: std::io::Error| {
            DomainError::Infrastructure(format!(
                "failed to append feedback to {}: {e}",
                self.path.display()
            ))
        };
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_err)?;
        file.write_all(format_entry(entry).as_bytes())
            .await
            .map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        info!("feedback recorded");
        Ok(())
    }
}

/// `<id> (<name>) at <timestamp>\n<text>\n\n`
fn format_entry(entry: &FeedbackEntry) -> String {
    format!(
        "{} ({}) at {}\n{}\n\n",
        entry.user,
        entry.name,
        entry.received_at.format("%Y-%m-%d %H:%M:%S%.6f"),
        entry.text
    )
}

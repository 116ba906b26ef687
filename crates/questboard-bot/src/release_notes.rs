//! Release-note files.

use std::path::Path;

use questboard_core::error::DomainError;
use tracing::{debug, instrument};

/// Reads `<dir>/patchnotes_<release_id>.txt`.
///
/// A missing file is `None`: the release is then neither announced nor
/// recorded.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` for any other read failure.
#[instrument]
pub async fn load_note(dir: &Path, release_id: &str) -> Result<Option<String>, DomainError> {
    let path = dir.join(format!("patchnotes_{release_id}.txt"));
    match tokio::fs::read_to_string(&path).await {
        Ok(note) => Ok(Some(note)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no release note file");
            Ok(None)
        }
        Err(e) => Err(DomainError::Infrastructure(format!(
            "failed to read release note {}: {e}",
            path.display()
        ))),
    }
}

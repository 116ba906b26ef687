//! JSON-file implementation of the `SnapshotStore` trait.
//!
//! Each save copies the current file to the backup path, writes the new
//! snapshot to a temp file next to it, fsyncs and renames it into place, so a
//! crash mid-save leaves either the old or the new snapshot, never a torn one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use questboard_core::error::DomainError;
use questboard_core::repository::{Snapshot, SnapshotStore};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Snapshot file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    path: PathBuf,
    backup_path: PathBuf,
}

impl FsSnapshotStore {
    /// Creates a store writing to `path` and keeping the previous save at
    /// `backup_path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path: backup_path.into(),
        }
    }

    /// Creates a store whose backup sits beside `path` with a `.bak` suffix.
    #[must_use]
    pub fn with_default_backup(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = default_backup_path(&path);
        Self { path, backup_path }
    }

    /// The snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The backup file.
    #[must_use]
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn rotate_backup(&self) -> Result<(), DomainError> {
        match tokio::fs::copy(&self.path, &self.backup_path).await {
            Ok(bytes) => {
                debug!(backup = %self.backup_path.display(), bytes, "previous snapshot backed up");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("back up snapshot to", &self.backup_path, &e)),
        }
    }

    async fn write_atomic(&self, json: &[u8]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("create snapshot directory", parent, &e))?;
        }

        let tmp_path = self.temp_path();
        let mut file = tokio::fs::File::create(&tmp_path)
            .await
            .map_err(|e| io_error("create temp file", &tmp_path, &e))?;
        file.write_all(json)
            .await
            .map_err(|e| io_error("write temp file", &tmp_path, &e))?;
        file.sync_all()
            .await
            .map_err(|e| io_error("fsync temp file", &tmp_path, &e))?;
        drop(file);

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| io_error("rename temp file to", &self.path, &e))
    }
}

/// `path` with `.bak` appended to its file name.
#[must_use]
pub fn default_backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> DomainError {
    DomainError::Infrastructure(format!("failed to {action} {}: {e}", path.display()))
}

async fn read_snapshot(path: &Path) -> Result<Option<Snapshot>, DomainError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error("read snapshot", path, &e)),
    };
    serde_json::from_slice(&bytes).map(Some).map_err(|e| {
        DomainError::Infrastructure(format!("failed to parse snapshot {}: {e}", path.display()))
    })
}

#[async_trait]
impl SnapshotStore for FsSnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>, DomainError> {
        match read_snapshot(&self.path).await {
            Ok(snapshot) => Ok(snapshot),
            Err(primary) => {
                warn!(error = %primary, backup = %self.backup_path.display(), "snapshot unreadable, trying backup");
                match read_snapshot(&self.backup_path).await {
                    Ok(Some(snapshot)) => Ok(Some(snapshot)),
                    Ok(None) | Err(_) => Err(primary),
                }
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), DomainError> {
        let json = serde_json::to_vec_pretty(snapshot).map_err(|e| {
            DomainError::Infrastructure(format!("failed to serialize snapshot: {e}"))
        })?;

        self.rotate_backup().await?;
        self.write_atomic(&json).await?;

        info!(path = %self.path.display(), bytes = json.len(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backup_path_appends_suffix() {
        let backup = default_backup_path(Path::new("/var/lib/questboard/state.json"));

        assert_eq!(backup, PathBuf::from("/var/lib/questboard/state.json.bak"));
    }

    #[test]
    fn test_temp_path_sits_beside_snapshot() {
        let store = FsSnapshotStore::with_default_backup("data/questboard.json");

        assert_eq!(store.temp_path(), PathBuf::from("data/questboard.json.tmp"));
        assert_eq!(store.backup_path(), Path::new("data/questboard.json.bak"));
    }
}

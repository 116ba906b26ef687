//! Loading and saving the board through a `SnapshotStore`.

use std::sync::Arc;

use questboard_board::domain::aggregates::QuestBoard;
use questboard_core::error::DomainError;
use questboard_core::repository::{Snapshot, SnapshotStore};
use tracing::{info, instrument};

/// Bridges the in-memory aggregate and durable storage.
#[derive(Clone)]
pub struct PersistenceManager {
    store: Arc<dyn SnapshotStore>,
}

impl std::fmt::Debug for PersistenceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceManager").finish_non_exhaustive()
    }
}

impl PersistenceManager {
    /// Creates a manager over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Restores the board, or an empty one if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the snapshot cannot be read
    /// or was written by a newer format.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<QuestBoard, DomainError> {
        let Some(snapshot) = self.store.load().await? else {
            info!("no snapshot found, starting with an empty board");
            return Ok(QuestBoard::new());
        };
        let board = QuestBoard::from_snapshot(snapshot)?;
        info!(users = board.users().len(), "board restored from snapshot");
        Ok(board)
    }

    /// Writes a snapshot taken earlier with [`QuestBoard::to_snapshot`].
    ///
    /// Callers copy the state while holding their lock and call this after
    /// releasing it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store fails.
    #[instrument(skip_all, fields(users = snapshot.users.len()))]
    pub async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<(), DomainError> {
        self.store.save(snapshot).await
    }

    /// Snapshots and writes `board` in one step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store fails.
    pub async fn save(&self, board: &QuestBoard) -> Result<(), DomainError> {
        self.save_snapshot(&board.to_snapshot()).await
    }
}

#[cfg(test)]
mod tests {
    use questboard_core::ids::UserId;
    use questboard_test_support::{FailingSnapshotStore, InMemorySnapshotStore};

    use super::*;

    #[tokio::test]
    async fn test_load_without_snapshot_gives_empty_board() {
        let manager = PersistenceManager::new(Arc::new(InMemorySnapshotStore::new()));

        let board = manager.load().await.unwrap();

        assert_eq!(board, QuestBoard::new());
    }

    #[tokio::test]
    async fn test_save_then_load_restores_board() {
        // Arrange
        let store = Arc::new(InMemorySnapshotStore::new());
        let manager = PersistenceManager::new(store.clone());
        let mut board = QuestBoard::new();
        board.register_user(UserId(7), "Gus").unwrap();
        board.create_quest(UserId(7)).unwrap();

        // Act
        manager.save(&board).await.unwrap();
        let restored = manager.load().await.unwrap();

        // Assert
        assert_eq!(restored, board);
        assert_eq!(store.saved_snapshots().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failures_surface_as_infrastructure_errors() {
        let manager = PersistenceManager::new(Arc::new(FailingSnapshotStore));

        let loaded = manager.load().await;
        let saved = manager.save(&QuestBoard::new()).await;

        assert!(matches!(loaded, Err(DomainError::Infrastructure(_))));
        assert!(matches!(saved, Err(DomainError::Infrastructure(_))));
    }
}

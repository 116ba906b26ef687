//! Test repositories: mock `SnapshotStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use questboard_core::error::DomainError;
use questboard_core::repository::{Snapshot, SnapshotStore};

/// A snapshot store that keeps the latest snapshot in memory and records
/// every save.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    current: Mutex<Option<Snapshot>>,
    saved: Mutex<Vec<Snapshot>>,
}

impl InMemorySnapshotStore {
    /// Create an empty store, as if no snapshot file exists yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose `load` returns `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: Mutex::new(Some(snapshot)),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Returns every snapshot passed to `save`, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_snapshots(&self) -> Vec<Snapshot> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>, DomainError> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), DomainError> {
        *self.current.lock().unwrap() = Some(snapshot.clone());
        self.saved.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

/// A snapshot store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingSnapshotStore;

#[async_trait]
impl SnapshotStore for FailingSnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn save(&self, _snapshot: &Snapshot) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}

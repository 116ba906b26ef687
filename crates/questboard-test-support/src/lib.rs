//! Shared test mocks and utilities for the quest board engine.

mod clock;
mod notifier;
mod policy;
mod repository;

pub use clock::{FixedClock, ManualClock};
pub use notifier::{FailingNotifier, RecordingNotifier};
pub use policy::StaticAdminPolicy;
pub use repository::{FailingSnapshotStore, InMemorySnapshotStore};

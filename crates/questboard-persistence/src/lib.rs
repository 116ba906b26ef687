//! Quest Board: durable snapshots.
//!
//! [`fs_snapshot_store::FsSnapshotStore`] keeps the board as one JSON file
//! plus a backup of the previous save. [`manager::PersistenceManager`] sits
//! between the aggregate and any [`SnapshotStore`](questboard_core::repository::SnapshotStore).

pub mod fs_snapshot_store;
pub mod manager;

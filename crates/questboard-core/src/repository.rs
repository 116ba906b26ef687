//! Snapshot records and the snapshot repository abstraction.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{QuestId, UserId};

/// Current on-disk snapshot layout.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Stored representation of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Participant identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

/// Stored representation of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRecord {
    /// Stable quest identifier.
    pub id: QuestId,
    /// Title, empty when not provided.
    #[serde(default)]
    pub title: String,
    /// Description, empty when not provided.
    #[serde(default)]
    pub description: String,
    /// Reward, empty when not provided.
    #[serde(default)]
    pub reward: String,
    /// Ids of users who accepted the quest.
    #[serde(default)]
    pub accepters: Vec<UserId>,
}

/// Full durable state of the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Layout version, see [`SNAPSHOT_FORMAT_VERSION`].
    #[serde(default)]
    pub version: u32,
    /// Next quest identifier to hand out.
    #[serde(default)]
    pub next_quest_id: u64,
    /// Registered users in display order.
    #[serde(default)]
    pub users: Vec<UserRecord>,
    /// Quest sequences keyed by owner, in creation order.
    #[serde(default)]
    pub board: BTreeMap<UserId, Vec<QuestRecord>>,
    /// The single archived quest per owner.
    #[serde(default)]
    pub archives: BTreeMap<UserId, QuestRecord>,
    /// Release identifiers already broadcast.
    #[serde(default)]
    pub patches: BTreeSet<String>,
}

/// Repository trait for loading and saving board snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the latest snapshot, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<Snapshot>, DomainError>;

    /// Persist `snapshot`, keeping the previous one as a backup.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), DomainError>;
}

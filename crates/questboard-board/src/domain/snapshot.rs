//! Conversion between the aggregate and its durable snapshot.

use questboard_core::error::DomainError;
use questboard_core::ids::UserId;
use questboard_core::repository::{
    QuestRecord, SNAPSHOT_FORMAT_VERSION, Snapshot, UserRecord,
};

use super::aggregates::{QuestBoard, sort_directory};
use super::entities::{Quest, User};

impl QuestBoard {
    /// Copies the full board state into a snapshot.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            next_quest_id: self.next_quest_id,
            users: self
                .users
                .iter()
                .map(|user| UserRecord {
                    id: user.id,
                    name: user.name.clone(),
                })
                .collect(),
            board: self
                .quests
                .iter()
                .map(|(owner, sequence)| (*owner, sequence.iter().map(to_record).collect()))
                .collect(),
            archives: self
                .archives
                .iter()
                .map(|(owner, quest)| (*owner, to_record(quest)))
                .collect(),
            patches: self.patches.clone(),
        }
    }

    /// Rebuilds a board from a snapshot.
    ///
    /// The directory is re-sorted, owners are stripped from their own accepter
    /// lists and the id counter is bumped past every stored quest, so a
    /// hand-edited snapshot cannot break the board's invariants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the snapshot was written by a
    /// newer format version or holds a quest id at the top of the id range.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, DomainError> {
        if snapshot.version > SNAPSHOT_FORMAT_VERSION {
            return Err(DomainError::Infrastructure(format!(
                "unsupported snapshot version {} (expected at most {SNAPSHOT_FORMAT_VERSION})",
                snapshot.version
            )));
        }

        let mut users: Vec<User> = snapshot
            .users
            .into_iter()
            .map(|record| User {
                id: record.id,
                name: record.name,
            })
            .collect();
        sort_directory(&mut users);

        let quests = snapshot
            .board
            .into_iter()
            .map(|(owner, records)| {
                let sequence = records
                    .into_iter()
                    .map(|record| from_record(owner, record))
                    .collect();
                (owner, sequence)
            })
            .collect();
        let archives = snapshot
            .archives
            .into_iter()
            .map(|(owner, record)| (owner, from_record(owner, record)))
            .collect();

        let mut board = Self {
            users,
            quests,
            archives,
            patches: snapshot.patches,
            next_quest_id: snapshot.next_quest_id,
        };
        for user in &board.users {
            board.quests.entry(user.id).or_default();
        }
        let past_highest = board
            .quests
            .values()
            .flatten()
            .chain(board.archives.values())
            .map(|quest| quest.id().0)
            .max()
            .map(|highest| {
                highest.checked_add(1).ok_or_else(|| {
                    DomainError::Infrastructure(format!(
                        "snapshot quest id {highest} leaves no room for new quests"
                    ))
                })
            })
            .transpose()?
            .unwrap_or(0);
        board.next_quest_id = board.next_quest_id.max(past_highest);

        Ok(board)
    }
}

fn to_record(quest: &Quest) -> QuestRecord {
    QuestRecord {
        id: quest.id(),
        title: quest.title().to_owned(),
        description: quest.description().to_owned(),
        reward: quest.reward().to_owned(),
        accepters: quest.accepters().iter().copied().collect(),
    }
}

fn from_record(owner: UserId, record: QuestRecord) -> Quest {
    let accepters = record
        .accepters
        .into_iter()
        .filter(|id| *id != owner)
        .collect();
    Quest::from_parts(
        record.id,
        record.title,
        record.description,
        record.reward,
        accepters,
    )
}

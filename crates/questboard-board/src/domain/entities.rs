//! Users and quests.

use std::collections::BTreeSet;
use std::fmt;

use questboard_core::ids::{QuestId, UserId};

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Participant identifier.
    pub id: UserId,
    /// Display name chosen at registration.
    pub name: String,
}

/// One of the three editable text fields of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestField {
    /// Short headline shown on buttons.
    Title,
    /// Free-form body.
    Description,
    /// What the questgiver offers in return.
    Reward,
}

impl fmt::Display for QuestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Reward => "reward",
        })
    }
}

/// Result of toggling acceptance on a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The user is now an accepter.
    Accepted,
    /// The user is no longer an accepter.
    Dropped,
}

/// A task posted by its owner. Empty text means "not provided".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    id: QuestId,
    title: String,
    description: String,
    reward: String,
    accepters: BTreeSet<UserId>,
}

impl Quest {
    /// Creates an empty quest.
    #[must_use]
    pub fn new(id: QuestId) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            reward: String::new(),
            accepters: BTreeSet::new(),
        }
    }

    pub(crate) fn from_parts(
        id: QuestId,
        title: String,
        description: String,
        reward: String,
        accepters: BTreeSet<UserId>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            reward,
            accepters,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> QuestId {
        self.id
    }

    /// Title, possibly empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Reward, possibly empty.
    #[must_use]
    pub fn reward(&self) -> &str {
        &self.reward
    }

    /// Users who accepted this quest.
    #[must_use]
    pub fn accepters(&self) -> &BTreeSet<UserId> {
        &self.accepters
    }

    /// Whether `user` accepted this quest.
    #[must_use]
    pub fn is_accepted_by(&self, user: UserId) -> bool {
        self.accepters.contains(&user)
    }

    /// Current value of `field`.
    #[must_use]
    pub fn field(&self, field: QuestField) -> &str {
        match field {
            QuestField::Title => &self.title,
            QuestField::Description => &self.description,
            QuestField::Reward => &self.reward,
        }
    }

    pub(crate) fn set_field(&mut self, field: QuestField, value: String) {
        match field {
            QuestField::Title => self.title = value,
            QuestField::Description => self.description = value,
            QuestField::Reward => self.reward = value,
        }
    }

    /// Flips membership of `user`, returning the new state.
    pub(crate) fn toggle(&mut self, user: UserId) -> Acceptance {
        if self.accepters.remove(&user) {
            Acceptance::Dropped
        } else {
            self.accepters.insert(user);
            Acceptance::Accepted
        }
    }

    pub(crate) fn forget(&mut self, user: UserId) {
        self.accepters.remove(&user);
    }
}

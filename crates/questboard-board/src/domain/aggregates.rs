//! The quest board aggregate.

use std::collections::{BTreeMap, BTreeSet};

use questboard_core::error::DomainError;
use questboard_core::ids::{QuestId, UserId};
use tracing::info;

use super::entities::{Acceptance, Quest, QuestField, User};

/// All durable board state behind one owner-checked API.
///
/// Quests are addressed by `(owner, QuestId)`. Positions inside an owner's
/// sequence still shift when a quest is removed, but identifiers do not, so a
/// stale reference either finds the same quest or fails with
/// [`DomainError::QuestNotFound`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestBoard {
    /// Registered users, ordered case-insensitively by name.
    pub(crate) users: Vec<User>,
    /// Quest sequences keyed by owner, in creation order.
    pub(crate) quests: BTreeMap<UserId, Vec<Quest>>,
    /// Single archived quest per owner.
    pub(crate) archives: BTreeMap<UserId, Quest>,
    /// Release identifiers already broadcast.
    pub(crate) patches: BTreeSet<String>,
    /// Next quest identifier to hand out.
    pub(crate) next_quest_id: u64,
}

impl QuestBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user and gives them an empty quest sequence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyName` for a blank name and
    /// `DomainError::AlreadyRegistered` if `id` is already present.
    pub fn register_user(&mut self, id: UserId, name: &str) -> Result<(), DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.user_exists(id) {
            return Err(DomainError::AlreadyRegistered(id));
        }

        self.users.push(User {
            id,
            name: name.to_owned(),
        });
        sort_directory(&mut self.users);
        self.quests.entry(id).or_default();

        info!(user_id = %id, name, "user registered");
        Ok(())
    }

    /// Removes a user and everything that hangs off them: their quests, their
    /// archive slot and their acceptance of anyone else's quests.
    ///
    /// Returns `false` if the user was not registered.
    pub fn remove_user(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        let existed = self.users.len() != before;

        self.quests.remove(&id);
        self.archives.remove(&id);
        for quest in self.quests.values_mut().flatten() {
            quest.forget(id);
        }
        for quest in self.archives.values_mut() {
            quest.forget(id);
        }

        if existed {
            info!(user_id = %id, "user removed");
        }
        existed
    }

    /// Appends an empty quest to the owner's sequence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotRegistered` if `owner` has no board and
    /// `DomainError::Infrastructure` once the id counter is exhausted.
    pub fn create_quest(&mut self, owner: UserId) -> Result<QuestId, DomainError> {
        if !self.user_exists(owner) {
            return Err(DomainError::NotRegistered(owner));
        }

        let id = QuestId(self.next_quest_id);
        self.next_quest_id = self.next_quest_id.checked_add(1).ok_or_else(|| {
            DomainError::Infrastructure("quest id counter exhausted".to_owned())
        })?;
        self.quests.entry(owner).or_default().push(Quest::new(id));

        info!(owner = %owner, quest = %id, "quest created");
        Ok(id)
    }

    /// Overwrites one text field of a quest.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuestNotFound` if the quest is not on the owner's
    /// board.
    pub fn set_field(
        &mut self,
        owner: UserId,
        quest: QuestId,
        field: QuestField,
        value: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.quest_mut(owner, quest)?.set_field(field, value.into());
        Ok(())
    }

    /// Deletes a quest and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotYourList` if `caller` is not `owner` and
    /// `DomainError::QuestNotFound` if the quest does not exist.
    pub fn delete_quest(
        &mut self,
        caller: UserId,
        owner: UserId,
        quest: QuestId,
    ) -> Result<Quest, DomainError> {
        ensure_owner(caller, owner)?;
        let removed = self.take_quest(owner, quest)?;

        info!(owner = %owner, quest = %quest, "quest deleted");
        Ok(removed)
    }

    /// Moves a quest into the owner's archive slot, replacing whatever was
    /// archived before, and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotYourList` if `caller` is not `owner` and
    /// `DomainError::QuestNotFound` if the quest does not exist.
    pub fn archive_quest(
        &mut self,
        caller: UserId,
        owner: UserId,
        quest: QuestId,
    ) -> Result<Quest, DomainError> {
        ensure_owner(caller, owner)?;
        let removed = self.take_quest(owner, quest)?;
        self.archives.insert(owner, removed.clone());

        info!(owner = %owner, quest = %quest, "quest archived");
        Ok(removed)
    }

    /// Accepts the quest for `user`, or drops it if already accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CannotAcceptOwnQuest` if `user` owns the quest and
    /// `DomainError::QuestNotFound` if the quest does not exist.
    pub fn toggle_accept(
        &mut self,
        owner: UserId,
        quest: QuestId,
        user: UserId,
    ) -> Result<Acceptance, DomainError> {
        if user == owner {
            return Err(DomainError::CannotAcceptOwnQuest(user));
        }
        let acceptance = self.quest_mut(owner, quest)?.toggle(user);

        info!(owner = %owner, quest = %quest, user_id = %user, ?acceptance, "acceptance toggled");
        Ok(acceptance)
    }

    /// Display names of a quest's accepters, ordered case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuestNotFound` if the quest does not exist.
    pub fn list_accepters(
        &self,
        owner: UserId,
        quest: QuestId,
    ) -> Result<Vec<String>, DomainError> {
        Ok(self.names_of(self.quest(owner, quest)?.accepters()))
    }

    /// Display names for a set of ids, in directory order. Unknown ids are
    /// skipped.
    #[must_use]
    pub fn names_of(&self, ids: &BTreeSet<UserId>) -> Vec<String> {
        self.users
            .iter()
            .filter(|user| ids.contains(&user.id))
            .map(|user| user.name.clone())
            .collect()
    }

    /// Resolves a `/display` or `/ban` argument to a user.
    ///
    /// Lookup order: participant id, exact name (case-insensitive), directory
    /// position, then a name fragment that must match exactly one user. Numeric
    /// queries stop after the position step, so a user called "42" is found by
    /// name before position 42 is considered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IndexOutOfRange` for a number matching neither an
    /// id nor a position and `DomainError::NoMatchingName` when text matches
    /// nobody or more than one user.
    pub fn find_user(&self, query: &str) -> Result<&User, DomainError> {
        let query = query.trim();
        let number = query.parse::<i64>().ok();

        if let Some(user) = number.and_then(|number| self.user(UserId(number))) {
            return Ok(user);
        }

        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Err(DomainError::NoMatchingName(query.to_owned()));
        }
        if let Some(user) = self
            .users
            .iter()
            .find(|user| user.name.to_lowercase() == needle)
        {
            return Ok(user);
        }

        if let Some(number) = number {
            return usize::try_from(number)
                .ok()
                .and_then(|position| self.users.get(position))
                .ok_or(DomainError::IndexOutOfRange {
                    index: number,
                    len: self.users.len(),
                });
        }

        let mut matches = self
            .users
            .iter()
            .filter(|user| user.name.to_lowercase().contains(&needle));
        match (matches.next(), matches.next()) {
            (Some(user), None) => Ok(user),
            _ => Err(DomainError::NoMatchingName(query.to_owned())),
        }
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn user_exists(&self, id: UserId) -> bool {
        self.user(id).is_some()
    }

    /// Looks up a registered user.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Display name of a registered user.
    #[must_use]
    pub fn display_name(&self, id: UserId) -> Option<&str> {
        self.user(id).map(|user| user.name.as_str())
    }

    /// Registered users in display order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The owner's quests in creation order (empty if none).
    #[must_use]
    pub fn quests_of(&self, owner: UserId) -> &[Quest] {
        self.quests.get(&owner).map(Vec::as_slice).unwrap_or_default()
    }

    /// Looks up a quest.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuestNotFound` if the quest is not on the owner's
    /// board.
    pub fn quest(&self, owner: UserId, quest: QuestId) -> Result<&Quest, DomainError> {
        self.quests_of(owner)
            .iter()
            .find(|candidate| candidate.id() == quest)
            .ok_or(DomainError::QuestNotFound { owner, quest })
    }

    /// The owner's archived quest, if any.
    #[must_use]
    pub fn archived(&self, owner: UserId) -> Option<&Quest> {
        self.archives.get(&owner)
    }

    /// Whether a release note was already broadcast.
    #[must_use]
    pub fn has_release(&self, release_id: &str) -> bool {
        self.patches.contains(release_id)
    }

    /// Records a release as broadcast. Returns `false` if it already was.
    pub fn record_release(&mut self, release_id: &str) -> bool {
        self.patches.insert(release_id.to_owned())
    }

    fn quest_mut(&mut self, owner: UserId, quest: QuestId) -> Result<&mut Quest, DomainError> {
        self.quests
            .get_mut(&owner)
            .and_then(|sequence| sequence.iter_mut().find(|candidate| candidate.id() == quest))
            .ok_or(DomainError::QuestNotFound { owner, quest })
    }

    fn take_quest(&mut self, owner: UserId, quest: QuestId) -> Result<Quest, DomainError> {
        let not_found = DomainError::QuestNotFound { owner, quest };
        let sequence = self.quests.get_mut(&owner).ok_or_else(|| not_found.clone())?;
        let position = sequence
            .iter()
            .position(|candidate| candidate.id() == quest)
            .ok_or(not_found)?;
        Ok(sequence.remove(position))
    }
}

fn ensure_owner(caller: UserId, owner: UserId) -> Result<(), DomainError> {
    if caller == owner {
        Ok(())
    } else {
        Err(DomainError::NotYourList {
            actor: caller,
            owner,
        })
    }
}

/// Case-insensitive, stable ordering by display name.
pub(crate) fn sort_directory(users: &mut [User]) {
    users.sort_by_cached_key(|user| user.name.to_lowercase());
}

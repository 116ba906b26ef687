//! Domain error types.

use thiserror::Error;

use crate::ids::{QuestId, UserId};

/// Top-level domain error type.
///
/// Every variant except [`DomainError::Infrastructure`] is a user error: the
/// router turns it into a message for the actor and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The actor has no board yet.
    #[error("user {0} is not registered")]
    NotRegistered(UserId),

    /// Registration was attempted twice.
    #[error("user {0} is already registered")]
    AlreadyRegistered(UserId),

    /// A numeric directory position outside the current user list.
    #[error("{index} is not a valid position in the range [0, {len})")]
    IndexOutOfRange {
        /// The requested position.
        index: i64,
        /// Number of registered users.
        len: usize,
    },

    /// A quest reference that no longer (or never did) resolve.
    #[error("quest {quest} not found on the board of user {owner}")]
    QuestNotFound {
        /// Owner named by the reference.
        owner: UserId,
        /// Quest named by the reference.
        quest: QuestId,
    },

    /// An owner-only action attempted on someone else's board.
    #[error("user {actor} does not own the board of user {owner}")]
    NotYourList {
        /// The acting user.
        actor: UserId,
        /// The board owner.
        owner: UserId,
    },

    /// Owners cannot accept their own quests.
    #[error("user {0} cannot accept their own quest")]
    CannotAcceptOwnQuest(UserId),

    /// A free-text user lookup matched nobody, or more than one user.
    #[error("no single user matches {0:?}")]
    NoMatchingName(String),

    /// Feedback was submitted without any text.
    #[error("feedback text is empty")]
    EmptyFeedback,

    /// Registration with a blank display name.
    #[error("display name is empty")]
    EmptyName,

    /// Session input arrived with no create/edit flow in progress.
    #[error("user {0} has no active session")]
    NoActiveSession(UserId),

    /// Session input that does not fit the current step.
    #[error("unexpected input: {0}")]
    UnexpectedInput(String),

    /// A command the router does not know.
    #[error("unrecognized input: {0}")]
    UnrecognizedInput(String),

    /// A callback token that does not follow the token grammar.
    #[error("malformed callback token: {0:?}")]
    MalformedCallback(String),

    /// The authorization policy refused an admin-only action.
    #[error("user {0} is not permitted to perform this action")]
    NotPermitted(UserId),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Returns `true` for faults the actor cannot fix by changing their input.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Infrastructure(_))
    }
}

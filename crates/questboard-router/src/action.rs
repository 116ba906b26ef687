//! Inbound actions.

use questboard_core::callback::CallbackToken;
use questboard_core::ids::{QuestId, UserId};
use questboard_session::domain::commands::SessionInput;
use serde::Deserialize;

/// The participant an action comes from, as identified by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Actor {
    /// Participant identifier.
    pub id: UserId,
    /// Name the transport knows the participant by. Used when registering
    /// without an explicit name.
    #[serde(default)]
    pub name: Option<String>,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub fn new(id: UserId, name: Option<String>) -> Self {
        Self { id, name }
    }
}

/// Everything the router can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Join the board, optionally under an explicit name.
    Register(Option<String>),
    /// Ask to leave; needs confirmation.
    Unregister,
    /// Leave the board.
    UnregisterConfirmed,
    /// Remove another participant (admin only).
    Ban(Option<String>),
    /// List participants.
    ListUsers,
    /// Show a board named by a typed id, position or name; `None` is the
    /// actor's own.
    Display(Option<String>),
    /// Show the board of exactly this participant, as pressed on a button.
    DisplayOwner(UserId),
    /// Quests the actor accepted.
    MyAccepted,
    /// Every non-empty board.
    ShowAll,
    /// Start the create flow.
    StartCreate,
    /// Start the edit flow for one of the actor's quests.
    StartEdit { owner: UserId, quest: QuestId },
    /// Input to the running create/edit flow.
    SessionInput(SessionInput),
    /// Accept or drop a quest.
    Toggle { owner: UserId, quest: QuestId },
    /// Delete one of the actor's quests.
    Delete { owner: UserId, quest: QuestId },
    /// Archive one of the actor's quests.
    Archive { owner: UserId, quest: QuestId },
    /// Show the actor's archived quest.
    ListArchive,
    /// Full text of a quest.
    Show { owner: UserId, quest: QuestId },
    /// Who accepted a quest.
    ListAccepters { owner: UserId, quest: QuestId },
    /// Free-text feedback for the operators.
    Feedback(String),
    /// Save and restart the host (admin only).
    Restart,
    /// Usage text.
    Help,
}

impl Action {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::Unregister => "unregister",
            Self::UnregisterConfirmed => "unregister_confirmed",
            Self::Ban(_) => "ban",
            Self::ListUsers => "list_users",
            Self::Display(_) => "display",
            Self::DisplayOwner(_) => "display_owner",
            Self::MyAccepted => "my_accepted",
            Self::ShowAll => "show_all",
            Self::StartCreate => "start_create",
            Self::StartEdit { .. } => "start_edit",
            Self::SessionInput(input) => input.input_type(),
            Self::Toggle { .. } => "toggle",
            Self::Delete { .. } => "delete",
            Self::Archive { .. } => "archive",
            Self::ListArchive => "list_archive",
            Self::Show { .. } => "show",
            Self::ListAccepters { .. } => "list_accepters",
            Self::Feedback(_) => "feedback",
            Self::Restart => "restart",
            Self::Help => "help",
        }
    }

    /// Whether the actor must be registered. Joining, help and feedback are
    /// open to anyone; ban and restart are gated by the admin policy instead.
    #[must_use]
    pub fn requires_registration(&self) -> bool {
        !matches!(
            self,
            Self::Register(_) | Self::Help | Self::Feedback(_) | Self::Ban(_) | Self::Restart
        )
    }
}

impl From<CallbackToken> for Action {
    fn from(token: CallbackToken) -> Self {
        match token {
            CallbackToken::Show { owner, quest } => Self::Show { owner, quest },
            CallbackToken::Toggle { owner, quest } => Self::Toggle { owner, quest },
            CallbackToken::Delete { owner, quest } => Self::Delete { owner, quest },
            CallbackToken::Archive { owner, quest } => Self::Archive { owner, quest },
            CallbackToken::Edit { owner, quest } => Self::StartEdit { owner, quest },
            CallbackToken::List { owner, quest } => Self::ListAccepters { owner, quest },
            CallbackToken::Display { owner } => Self::DisplayOwner(owner),
            CallbackToken::ShowAll => Self::ShowAll,
        }
    }
}

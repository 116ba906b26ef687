//! Mutation → notification rules.

use questboard_board::domain::aggregates::QuestBoard;
use questboard_board::domain::entities::{Acceptance, Quest};
use questboard_core::callback::CallbackToken;
use questboard_core::ids::{QuestId, UserId};
use questboard_core::markup::{escape, quest_label};
use questboard_core::notification::{Button, Notification};

/// How a quest reached its committed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// A create flow finished.
    Created,
    /// An edit flow finished.
    Edited,
}

/// A board mutation worth telling people about.
#[derive(Debug, Clone, Copy)]
pub enum Mutation<'a> {
    /// A create or edit flow completed.
    QuestCommitted {
        /// Quest owner.
        owner: UserId,
        /// The committed quest, still on the board.
        quest: QuestId,
        /// Created or edited.
        kind: CommitKind,
    },
    /// A user accepted or dropped a quest.
    AcceptanceToggled {
        /// Quest owner.
        owner: UserId,
        /// The toggled quest.
        quest: QuestId,
        /// Who toggled.
        user: UserId,
        /// New membership.
        acceptance: Acceptance,
    },
    /// A quest was deleted.
    QuestDeleted {
        /// Former owner.
        owner: UserId,
        /// The quest as it was just before removal.
        removed: &'a Quest,
    },
    /// A quest was moved to the archive slot.
    QuestArchived {
        /// Owner.
        owner: UserId,
        /// The quest as it was just before the move.
        removed: &'a Quest,
    },
}

/// Computes the messages a mutation triggers, in delivery order.
///
/// `board` must reflect the state after the mutation. Unknown owners or
/// quests produce no messages.
#[must_use]
pub fn fan_out(board: &QuestBoard, mutation: &Mutation<'_>) -> Vec<Notification> {
    match *mutation {
        Mutation::QuestCommitted { owner, quest, kind } => committed(board, owner, quest, kind),
        Mutation::AcceptanceToggled {
            owner,
            quest,
            user,
            acceptance,
        } => toggled(board, owner, quest, user, acceptance),
        Mutation::QuestDeleted { owner, removed } => to_accepters(board, owner, removed, "deleted"),
        Mutation::QuestArchived { owner, removed } => {
            to_accepters(board, owner, removed, "archived")
        }
    }
}

fn name_of(board: &QuestBoard, user: UserId) -> String {
    escape(board.display_name(user).unwrap_or("Someone"))
}

fn committed(
    board: &QuestBoard,
    owner: UserId,
    quest: QuestId,
    kind: CommitKind,
) -> Vec<Notification> {
    let Ok(found) = board.quest(owner, quest) else {
        return Vec::new();
    };
    let owner_name = name_of(board, owner);
    let title = quest_label(found.title());
    let text = match kind {
        CommitKind::Created => format!("{owner_name} posted a new sidequest: <b>{title}</b>"),
        CommitKind::Edited => format!("{owner_name} updated their sidequest: <b>{title}</b>"),
    };

    board
        .users()
        .iter()
        .filter(|user| user.id != owner)
        .map(|user| {
            Notification::text(user.id, text.clone())
                .with_button(Button::new("View", CallbackToken::Show { owner, quest }))
        })
        .collect()
}

fn toggled(
    board: &QuestBoard,
    owner: UserId,
    quest: QuestId,
    user: UserId,
    acceptance: Acceptance,
) -> Vec<Notification> {
    let Ok(found) = board.quest(owner, quest) else {
        return Vec::new();
    };
    let owner_name = name_of(board, owner);
    let user_name = name_of(board, user);
    let title = quest_label(found.title());

    let (to_owner, to_user) = match acceptance {
        Acceptance::Accepted => (
            format!("{user_name} accepted your sidequest <b>{title}</b>!"),
            format!("You accepted <b>{title}</b> for {owner_name}."),
        ),
        Acceptance::Dropped => (
            format!("{user_name} is no longer doing your sidequest <b>{title}</b>."),
            format!("You are no longer doing <b>{title}</b> for {owner_name}."),
        ),
    };

    vec![
        Notification::text(owner, to_owner),
        Notification::text(user, to_user),
    ]
}

fn to_accepters(
    board: &QuestBoard,
    owner: UserId,
    removed: &Quest,
    verb: &str,
) -> Vec<Notification> {
    let owner_name = name_of(board, owner);
    let title = quest_label(removed.title());
    let text = format!("{owner_name} {verb} the sidequest <b>{title}</b> that you accepted.");

    removed
        .accepters()
        .iter()
        .map(|accepter| Notification::text(*accepter, text.clone()))
        .collect()
}

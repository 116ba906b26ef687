//! Query handlers for the board context.
//!
//! Read-only views over a [`QuestBoard`], shaped for rendering. None of these
//! mutate state.

use questboard_core::error::DomainError;
use questboard_core::ids::{QuestId, UserId};
use serde::Serialize;

use crate::domain::aggregates::QuestBoard;
use crate::domain::entities::Quest;

/// One line of a board listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestSummary {
    /// Quest owner.
    pub owner: UserId,
    /// Quest identifier.
    pub quest: QuestId,
    /// Title (possibly empty).
    pub title: String,
    /// Whether the viewer accepted this quest.
    pub accepted_by_viewer: bool,
    /// Number of accepters.
    pub accepter_count: usize,
}

/// A user's board as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Board owner.
    pub owner: UserId,
    /// Owner's display name.
    pub owner_name: String,
    /// Whether the viewer owns this board.
    pub viewer_is_owner: bool,
    /// Quests in creation order.
    pub quests: Vec<QuestSummary>,
}

/// Everything known about one quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestDetails {
    /// Quest owner.
    pub owner: UserId,
    /// Owner's display name.
    pub owner_name: String,
    /// Quest identifier.
    pub quest: QuestId,
    /// Title (possibly empty).
    pub title: String,
    /// Description (possibly empty).
    pub description: String,
    /// Reward (possibly empty).
    pub reward: String,
    /// Accepter display names in directory order.
    pub accepters: Vec<String>,
}

fn summarize(owner: UserId, quest: &Quest, viewer: UserId) -> QuestSummary {
    QuestSummary {
        owner,
        quest: quest.id(),
        title: quest.title().to_owned(),
        accepted_by_viewer: quest.is_accepted_by(viewer),
        accepter_count: quest.accepters().len(),
    }
}

fn details(board: &QuestBoard, owner: UserId, quest: &Quest) -> QuestDetails {
    QuestDetails {
        owner,
        owner_name: board.display_name(owner).unwrap_or_default().to_owned(),
        quest: quest.id(),
        title: quest.title().to_owned(),
        description: quest.description().to_owned(),
        reward: quest.reward().to_owned(),
        accepters: board.names_of(quest.accepters()),
    }
}

/// Returns `owner`'s board from `viewer`'s perspective.
///
/// # Errors
///
/// Returns `DomainError::NotRegistered` if `owner` has no board.
pub fn get_board_view(
    board: &QuestBoard,
    owner: UserId,
    viewer: UserId,
) -> Result<BoardView, DomainError> {
    let owner_name = board
        .display_name(owner)
        .ok_or(DomainError::NotRegistered(owner))?
        .to_owned();
    Ok(BoardView {
        owner,
        owner_name,
        viewer_is_owner: owner == viewer,
        quests: board
            .quests_of(owner)
            .iter()
            .map(|quest| summarize(owner, quest, viewer))
            .collect(),
    })
}

/// Returns the full text of a live quest.
///
/// # Errors
///
/// Returns `DomainError::QuestNotFound` if the quest does not exist.
pub fn get_quest_details(
    board: &QuestBoard,
    owner: UserId,
    quest: QuestId,
) -> Result<QuestDetails, DomainError> {
    let found = board.quest(owner, quest)?;
    Ok(details(board, owner, found))
}

/// Returns the owner's archived quest, if any.
#[must_use]
pub fn get_archived_quest(board: &QuestBoard, owner: UserId) -> Option<QuestDetails> {
    board
        .archived(owner)
        .map(|quest| details(board, owner, quest))
}

/// Every quest `user` has accepted, grouped by owner in directory order.
#[must_use]
pub fn get_accepted_quests(board: &QuestBoard, user: UserId) -> Vec<QuestSummary> {
    board
        .users()
        .iter()
        .flat_map(move |owner| {
            board
                .quests_of(owner.id)
                .iter()
                .filter(move |quest| quest.is_accepted_by(user))
                .map(move |quest| summarize(owner.id, quest, user))
        })
        .collect()
}

/// Every non-empty board in directory order, from `viewer`'s perspective.
#[must_use]
pub fn get_all_boards(board: &QuestBoard, viewer: UserId) -> Vec<BoardView> {
    board
        .users()
        .iter()
        .filter(|owner| !board.quests_of(owner.id).is_empty())
        .filter_map(|owner| get_board_view(board, owner.id, viewer).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::QuestField;

    const ADA: UserId = UserId(1);
    const BOB: UserId = UserId(2);

    fn board() -> (QuestBoard, QuestId, QuestId) {
        let mut board = QuestBoard::new();
        board.register_user(ADA, "Ada").unwrap();
        board.register_user(BOB, "Bob").unwrap();
        let walk = board.create_quest(ADA).unwrap();
        board.set_field(ADA, walk, QuestField::Title, "Walk dog").unwrap();
        let paint = board.create_quest(ADA).unwrap();
        board.set_field(ADA, paint, QuestField::Title, "Paint").unwrap();
        board.toggle_accept(ADA, paint, BOB).unwrap();
        (board, walk, paint)
    }

    #[test]
    fn test_get_board_view_marks_viewer_acceptance() {
        // Arrange
        let (board, walk, paint) = board();

        // Act
        let view = get_board_view(&board, ADA, BOB).unwrap();

        // Assert
        assert_eq!(view.owner_name, "Ada");
        assert!(!view.viewer_is_owner);
        assert_eq!(view.quests.len(), 2);
        assert_eq!(view.quests[0].quest, walk);
        assert!(!view.quests[0].accepted_by_viewer);
        assert_eq!(view.quests[1].quest, paint);
        assert!(view.quests[1].accepted_by_viewer);
        assert_eq!(view.quests[1].accepter_count, 1);
    }

    #[test]
    fn test_get_board_view_rejects_unknown_owner() {
        let (board, _, _) = board();

        let result = get_board_view(&board, UserId(77), ADA);

        assert_eq!(result, Err(DomainError::NotRegistered(UserId(77))));
    }

    #[test]
    fn test_get_quest_details_lists_accepter_names() {
        let (board, _, paint) = board();

        let details = get_quest_details(&board, ADA, paint).unwrap();

        assert_eq!(details.title, "Paint");
        assert_eq!(details.accepters, ["Bob"]);
    }

    #[test]
    fn test_get_accepted_quests_spans_owners() {
        let (mut board, _, paint) = board();
        let chores = board.create_quest(BOB).unwrap();
        board.toggle_accept(BOB, chores, ADA).unwrap();

        let accepted_by_bob = get_accepted_quests(&board, BOB);
        let accepted_by_ada = get_accepted_quests(&board, ADA);

        assert_eq!(accepted_by_bob.len(), 1);
        assert_eq!(accepted_by_bob[0].quest, paint);
        assert_eq!(accepted_by_ada.len(), 1);
        assert_eq!(accepted_by_ada[0].owner, BOB);
    }

    #[test]
    fn test_get_all_boards_skips_empty_boards() {
        let (board, _, _) = board();

        let boards = get_all_boards(&board, BOB);

        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].owner, ADA);
    }

    #[test]
    fn test_get_archived_quest() {
        let (mut board, walk, _) = board();
        assert!(get_archived_quest(&board, ADA).is_none());

        board.archive_quest(ADA, ADA, walk).unwrap();

        let archived = get_archived_quest(&board, ADA).unwrap();
        assert_eq!(archived.title, "Walk dog");
    }
}

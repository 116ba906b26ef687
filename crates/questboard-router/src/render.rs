//! Read models to replies.

use std::fmt::Write as _;

use questboard_board::application::query_handlers::{BoardView, QuestDetails, QuestSummary};
use questboard_board::domain::aggregates::QuestBoard;
use questboard_core::callback::CallbackToken;
use questboard_core::markup::{escape, quest_label};
use questboard_core::notification::Button;

use crate::messages;
use crate::outcome::Reply;

const ACCEPTED: &str = "☑️";
const NOT_ACCEPTED: &str = "⬜";

/// Button text for a quest title. Button labels are not parsed as HTML.
fn button_label(title: &str) -> String {
    if title.trim().is_empty() {
        "(untitled)".to_owned()
    } else {
        title.to_owned()
    }
}

/// A board with per-quest buttons.
///
/// The owner gets delete/archive/edit/accepters controls under each quest;
/// anyone else gets an accept toggle reflecting their own acceptance.
#[must_use]
pub fn board(view: &BoardView) -> Reply {
    let mut text = format!("<b>Sidequests for {}:</b>\n\n", escape(&view.owner_name));
    if view.quests.is_empty() {
        text.push_str(messages::NO_QUESTS);
    }

    let mut rows = Vec::with_capacity(view.quests.len() * 2);
    for summary in &view.quests {
        let (owner, quest) = (summary.owner, summary.quest);
        rows.push(vec![Button::new(
            button_label(&summary.title),
            CallbackToken::Show { owner, quest },
        )]);
        if view.viewer_is_owner {
            rows.push(vec![
                Button::new("❌", CallbackToken::Delete { owner, quest }),
                Button::new("🔒", CallbackToken::Archive { owner, quest }),
                Button::new("✏️", CallbackToken::Edit { owner, quest }),
                Button::new("👥", CallbackToken::List { owner, quest }),
            ]);
        } else {
            let mark = if summary.accepted_by_viewer {
                ACCEPTED
            } else {
                NOT_ACCEPTED
            };
            rows.push(vec![Button::new(mark, CallbackToken::Toggle { owner, quest })]);
        }
    }

    Reply::new(text).with_buttons(rows)
}

/// Full text of a quest.
#[must_use]
pub fn quest(details: &QuestDetails) -> Reply {
    Reply::new(format!(
        "<b>Title:</b> {}\n\n<b>Description:</b> {}\n\n<b>Reward:</b> {}",
        escape(&details.title),
        escape(&details.description),
        escape(&details.reward),
    ))
}

/// The archived quest, with a header naming it as such.
#[must_use]
pub fn archive(details: &QuestDetails) -> Reply {
    let mut reply = quest(details);
    reply.text = format!("<b>Your archived sidequest</b>\n\n{}", reply.text);
    reply
}

/// The participant directory, one display button per user.
#[must_use]
pub fn users(board: &QuestBoard) -> Reply {
    if board.users().is_empty() {
        return Reply::new(messages::NOBODY_REGISTERED);
    }
    let rows = board
        .users()
        .iter()
        .map(|user| {
            vec![Button::new(
                user.name.clone(),
                CallbackToken::Display { owner: user.id },
            )]
        })
        .collect();
    Reply::new(messages::USERS_HEADER).with_buttons(rows)
}

/// Quests the viewer accepted, each labelled with its owner.
#[must_use]
pub fn accepted(board: &QuestBoard, summaries: &[QuestSummary]) -> Reply {
    if summaries.is_empty() {
        return Reply::new(messages::NOTHING_ACCEPTED);
    }
    let rows = summaries
        .iter()
        .map(|summary| {
            let owner_name = board.display_name(summary.owner).unwrap_or_default();
            vec![Button::new(
                format!("{} ({owner_name})", button_label(&summary.title)),
                CallbackToken::Show {
                    owner: summary.owner,
                    quest: summary.quest,
                },
            )]
        })
        .collect();
    Reply::new("<b>Sidequests you accepted:</b>").with_buttons(rows)
}

/// Every non-empty board as one listing.
#[must_use]
pub fn all_boards(views: &[BoardView]) -> Reply {
    if views.is_empty() {
        return Reply::new(messages::BOARD_EMPTY);
    }

    let mut text = String::from("<b>All sidequests</b>");
    let mut rows = Vec::with_capacity(views.len());
    for view in views {
        let _ = write!(text, "\n\n<b>{}</b>", escape(&view.owner_name));
        for summary in &view.quests {
            let mark = if summary.accepted_by_viewer {
                ACCEPTED
            } else {
                "•"
            };
            let _ = write!(text, "\n{mark} {}", quest_label(&summary.title));
        }
        rows.push(vec![Button::new(
            format!("Sidequests for {}", view.owner_name),
            CallbackToken::Display { owner: view.owner },
        )]);
    }
    Reply::new(text).with_buttons(rows)
}

/// Accepter names for a quest.
#[must_use]
pub fn accepters(title: &str, names: &[String]) -> Reply {
    if names.is_empty() {
        return Reply::new(messages::NO_ACCEPTERS);
    }
    let mut text = format!("<b>Who accepted {}:</b>", quest_label(title));
    for name in names {
        let _ = write!(text, "\n{}", escape(name));
    }
    Reply::new(text)
}

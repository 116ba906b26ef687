//! Release-note broadcast.

use questboard_board::domain::aggregates::QuestBoard;
use questboard_core::notification::Notification;
use tracing::info;

/// Builds the release announcement for every registered user and records
/// `release_id` in the patch log.
///
/// Returns nothing, and records nothing, when the release was already
/// announced or there is no note to send.
pub fn announce_release(
    board: &mut QuestBoard,
    release_id: &str,
    note: Option<&str>,
) -> Vec<Notification> {
    if board.has_release(release_id) {
        info!(release_id, "release already announced");
        return Vec::new();
    }
    let Some(note) = note.map(str::trim).filter(|note| !note.is_empty()) else {
        info!(release_id, "no release note to announce");
        return Vec::new();
    };

    board.record_release(release_id);
    let notifications: Vec<Notification> = board
        .users()
        .iter()
        .map(|user| Notification::text(user.id, note))
        .collect();
    info!(release_id, recipients = notifications.len(), "release announced");
    notifications
}

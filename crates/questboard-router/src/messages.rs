//! User-facing message texts.

use questboard_core::error::DomainError;
use questboard_core::markup::escape;

pub const HELP: &str = "<b>Sidequest board</b>\n\n\
/am [name] - join the board\n\
/users - list everyone on the board\n\
/d [id or name] - show a sidequest list (yours by default)\n\
/sq - post a new sidequest\n\
/ms - sidequests you accepted\n\
/sa - every sidequest on the board\n\
/archives - your last archived sidequest\n\
/feedback text - tell the maintainers something\n\
/rm - leave the board";

pub const REGISTERED: &str =
    "You've been added! Make sure to DM the bot with /start to be able to get messages!";
pub const CONFIRM_UNREGISTER: &str = "Are you sure you want to leave? If so, use /rmc.";
pub const UNREGISTERED: &str = "You've been removed!";
pub const BANNED: &str = "That user has been removed!";
pub const BAN_USAGE: &str = "Usage: /ban {ID from /users or name}";
pub const USERS_HEADER: &str = "Users:";
pub const NOBODY_REGISTERED: &str = "Nobody has joined yet.";

pub const CREATE_PROMPT: &str = "Let's begin adding a new sidequest! \
First, send me a title, use /skiptitle, or use /removetitle. \
You can cancel at any time using /cancel.";
pub const EDIT_PROMPT: &str = "Let's begin editing that sidequest! \
First, send me a title, use /skiptitle, or use /removetitle. \
You can cancel at any time using /cancel.";

pub const TITLE_SET: &str =
    "Now send me some text for the description, use /skipdesc, or use /removedesc.";
pub const TITLE_SKIPPED: &str =
    "No title added. Now send me some text for the description, use /skipdesc, or use /removedesc.";
pub const TITLE_CLEARED: &str = "Alright, the title has been removed! \
Now send me some text for the description, use /skipdesc, or use /removedesc.";
pub const DESCRIPTION_SET: &str = "Thanks! Lastly, you need to send some text for the reward, \
use /skipreward, or use /removereward.";
pub const DESCRIPTION_SKIPPED: &str = "No description added. Lastly, you need to send some text \
for the reward, use /skipreward, or use /removereward.";
pub const DESCRIPTION_CLEARED: &str = "That description has been removed! Lastly, you need to \
send some text for the reward, use /skipreward, or use /removereward.";
pub const REWARD_SET: &str = "Thanks! You're all done!";
pub const REWARD_SKIPPED: &str = "No reward added. You're all done!";
pub const REWARD_CLEARED: &str = "The reward has been removed. You're all done!";
pub const CANCELLED: &str = "Exited from sidequest creator!";

pub const NOTHING_ACCEPTED: &str = "You haven't accepted any sidequests yet.";
pub const BOARD_EMPTY: &str = "There are no sidequests on the board yet.";
pub const NO_ARCHIVE: &str = "You haven't archived any sidequests.";
pub const NO_ACCEPTERS: &str = "Nobody has accepted this sidequest yet.";
pub const NO_QUESTS: &str = "No sidequests yet.";

pub const FEEDBACK_RECORDED: &str = "Your response has been recorded!";
pub const RESTARTING: &str = "Bot is restarting...";
pub const GENERIC_FAILURE: &str = "Something went wrong on our end. Please try again later.";

/// The message shown to the actor for a rejected action.
#[must_use]
pub fn describe(error: &DomainError) -> String {
    match error {
        DomainError::NotRegistered(_) => {
            "You don't have a sidequest board yet! Make one using /am.".to_owned()
        }
        DomainError::AlreadyRegistered(_) => "You're already in the database!".to_owned(),
        DomainError::IndexOutOfRange { index, len } => {
            format!("That ({index}) is not a valid ID in the range [0, {len})!")
        }
        DomainError::QuestNotFound { .. } => "That sidequest doesn't exist anymore!".to_owned(),
        DomainError::NotYourList { .. } => "That's not your sidequest list!".to_owned(),
        DomainError::CannotAcceptOwnQuest(_) => "You can't toggle your own sidequests!".to_owned(),
        DomainError::NoMatchingName(_) => "Error: Could not find a matching name!".to_owned(),
        DomainError::EmptyFeedback => "Error: You must input a non-empty string.".to_owned(),
        DomainError::EmptyName => "Tell me what to call you, e.g. /am Ada.".to_owned(),
        DomainError::NoActiveSession(_) => {
            "You aren't writing a sidequest right now. Start one with /sq.".to_owned()
        }
        DomainError::UnexpectedInput(detail) => {
            format!("That doesn't fit here: {}.", escape(detail))
        }
        DomainError::UnrecognizedInput(text) => {
            format!("I don't know {}. Try /help.", escape(text))
        }
        DomainError::MalformedCallback(_) => {
            "That button is no longer valid. Open the list again with /d.".to_owned()
        }
        DomainError::NotPermitted(_) => "You're not allowed to do that.".to_owned(),
        DomainError::Infrastructure(_) => GENERIC_FAILURE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use questboard_core::ids::UserId;

    use super::*;

    #[test]
    fn test_range_error_states_the_range() {
        let text = describe(&DomainError::IndexOutOfRange { index: 7, len: 3 });

        assert_eq!(text, "That (7) is not a valid ID in the range [0, 3)!");
    }

    #[test]
    fn test_echoed_input_is_escaped() {
        let text = describe(&DomainError::UnrecognizedInput("/<b>".to_owned()));

        assert_eq!(text, "I don't know /&lt;b&gt;. Try /help.");
    }

    #[test]
    fn test_infrastructure_details_are_hidden() {
        let text = describe(&DomainError::Infrastructure("disk on fire".to_owned()));

        assert_eq!(text, GENERIC_FAILURE);
        assert!(!describe(&DomainError::NotRegistered(UserId(1))).is_empty());
    }
}

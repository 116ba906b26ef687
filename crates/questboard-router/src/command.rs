//! Text and button payloads to [`Action`]s.

use questboard_board::domain::entities::QuestField;
use questboard_core::callback::CallbackToken;
use questboard_core::error::DomainError;
use questboard_session::domain::commands::SessionInput;

use crate::action::Action;

/// Parses a chat message.
///
/// Commands start with `/`, may carry an `@botname` suffix and are matched
/// case-insensitively. Anything else is free text for the running session.
///
/// # Errors
///
/// Returns `DomainError::UnrecognizedInput` for an unknown command.
pub fn parse_command(text: &str) -> Result<Action, DomainError> {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Action::SessionInput(SessionInput::Text(trimmed.to_owned())));
    };

    let (head, args) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(head, args)| (head, args.trim()));
    let command = head
        .split_once('@')
        .map_or(head, |(command, _bot)| command)
        .to_lowercase();
    let argument = (!args.is_empty()).then(|| args.to_owned());

    let action = match command.as_str() {
        "start" | "help" => Action::Help,
        "addme" | "setname" | "am" | "sn" => Action::Register(argument),
        "removeme" | "rm" => Action::Unregister,
        "rmc" => Action::UnregisterConfirmed,
        "ban" => Action::Ban(argument),
        "users" | "u" => Action::ListUsers,
        "display" | "view" | "d" => Action::Display(argument),
        "mysidequests" | "ms" => Action::MyAccepted,
        "showall" | "sa" => Action::ShowAll,
        "archives" => Action::ListArchive,
        "sidequest" | "sq" => Action::StartCreate,
        "skiptitle" => Action::SessionInput(SessionInput::Skip(QuestField::Title)),
        "skipdesc" => Action::SessionInput(SessionInput::Skip(QuestField::Description)),
        "skipreward" => Action::SessionInput(SessionInput::Skip(QuestField::Reward)),
        "removetitle" => Action::SessionInput(SessionInput::Clear(QuestField::Title)),
        "removedesc" => Action::SessionInput(SessionInput::Clear(QuestField::Description)),
        "removereward" => Action::SessionInput(SessionInput::Clear(QuestField::Reward)),
        "cancel" => Action::SessionInput(SessionInput::Cancel),
        "feedback" | "report" => Action::Feedback(args.to_owned()),
        "restart" => Action::Restart,
        _ => return Err(DomainError::UnrecognizedInput(format!("/{command}"))),
    };
    Ok(action)
}

/// Parses a button payload.
///
/// # Errors
///
/// Returns `DomainError::MalformedCallback` if `data` is not a valid token.
pub fn parse_callback(data: &str) -> Result<Action, DomainError> {
    data.parse::<CallbackToken>().map(Action::from)
}

#[cfg(test)]
mod tests {
    use questboard_core::ids::{QuestId, UserId};

    use super::*;

    #[test]
    fn test_aliases_map_to_the_same_action() {
        for text in ["/addme", "/setname", "/am", "/sn"] {
            assert_eq!(parse_command(text), Ok(Action::Register(None)), "{text}");
        }
        for text in ["/display", "/view", "/d"] {
            assert_eq!(parse_command(text), Ok(Action::Display(None)), "{text}");
        }
        for text in ["/sidequest", "/sq"] {
            assert_eq!(parse_command(text), Ok(Action::StartCreate), "{text}");
        }
    }

    #[test]
    fn test_arguments_are_joined_and_trimmed() {
        let action = parse_command("/am   Ada  Lovelace ").unwrap();

        assert_eq!(action, Action::Register(Some("Ada  Lovelace".to_owned())));
    }

    #[test]
    fn test_bot_suffix_and_case_are_ignored() {
        assert_eq!(parse_command("/MS@QuestBot"), Ok(Action::MyAccepted));
        assert_eq!(
            parse_command("/D@QuestBot bob"),
            Ok(Action::Display(Some("bob".to_owned())))
        );
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(
            parse_command("/skipdesc"),
            Ok(Action::SessionInput(SessionInput::Skip(QuestField::Description)))
        );
        assert_eq!(
            parse_command("/removereward"),
            Ok(Action::SessionInput(SessionInput::Clear(QuestField::Reward)))
        );
        assert_eq!(
            parse_command("/cancel"),
            Ok(Action::SessionInput(SessionInput::Cancel))
        );
    }

    #[test]
    fn test_plain_text_is_session_input() {
        let action = parse_command("  Fix fence ").unwrap();

        assert_eq!(
            action,
            Action::SessionInput(SessionInput::Text("Fix fence".to_owned()))
        );
    }

    #[test]
    fn test_feedback_keeps_empty_text_for_the_router_to_reject() {
        assert_eq!(parse_command("/report"), Ok(Action::Feedback(String::new())));
        assert_eq!(
            parse_command("/feedback love it"),
            Ok(Action::Feedback("love it".to_owned()))
        );
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let result = parse_command("/dance now");

        assert_eq!(result, Err(DomainError::UnrecognizedInput("/dance".to_owned())));
    }

    #[test]
    fn test_parse_callback() {
        assert_eq!(
            parse_callback("TOGGLE,5,3"),
            Ok(Action::Toggle {
                owner: UserId(5),
                quest: QuestId(3)
            })
        );
        assert_eq!(parse_callback("SHOWALL"), Ok(Action::ShowAll));
        assert!(matches!(
            parse_callback("TOGGLE,5"),
            Err(DomainError::MalformedCallback(_))
        ));
    }
}

//! Session state machine.

use chrono::{DateTime, Utc};
use questboard_board::domain::entities::QuestField;
use questboard_core::error::DomainError;
use questboard_core::ids::{QuestId, UserId};

use super::commands::SessionInput;

/// Position in the title → description → reward flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No flow in progress.
    Idle,
    /// Waiting for the title.
    AwaitingTitle,
    /// Waiting for the description.
    AwaitingDescription,
    /// Waiting for the reward, the last field.
    AwaitingReward,
}

impl SessionState {
    /// The field this state is waiting for.
    #[must_use]
    pub fn awaited_field(self) -> Option<QuestField> {
        match self {
            Self::Idle => None,
            Self::AwaitingTitle => Some(QuestField::Title),
            Self::AwaitingDescription => Some(QuestField::Description),
            Self::AwaitingReward => Some(QuestField::Reward),
        }
    }

    fn after_field(self) -> Self {
        match self {
            Self::AwaitingTitle => Self::AwaitingDescription,
            Self::AwaitingDescription => Self::AwaitingReward,
            Self::Idle | Self::AwaitingReward => Self::Idle,
        }
    }
}

/// Whether the flow fills a fresh quest or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// The quest was created when the flow started.
    Create,
    /// An existing quest is being edited.
    Edit,
}

/// One user's in-progress create/edit flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The user typing; always the quest owner.
    pub owner: UserId,
    /// The quest being filled in.
    pub quest: QuestId,
    /// Create or edit.
    pub mode: SessionMode,
    /// Current step.
    pub state: SessionState,
    /// When the last accepted input arrived.
    pub last_activity: DateTime<Utc>,
}

/// What a single input does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the input; `Idle` ends the session.
    pub next: SessionState,
    /// Field write to apply to the quest, if any.
    pub write: Option<(QuestField, String)>,
    /// Whether the flow was abandoned rather than completed.
    pub cancelled: bool,
}

/// Computes the effect of `input` in `state`.
///
/// Skip and clear must name the awaited field; anything else is rejected so
/// a stray `/skipdesc` while the title is awaited cannot silently advance the
/// flow.
///
/// # Errors
///
/// Returns `DomainError::UnexpectedInput` if the input does not fit `state`.
pub fn transition(state: SessionState, input: SessionInput) -> Result<Transition, DomainError> {
    let Some(awaited) = state.awaited_field() else {
        return Err(DomainError::UnexpectedInput(
            "no field is awaited".to_owned(),
        ));
    };

    let advance = |write| Transition {
        next: state.after_field(),
        write,
        cancelled: false,
    };

    match input {
        SessionInput::Cancel => Ok(Transition {
            next: SessionState::Idle,
            write: None,
            cancelled: true,
        }),
        SessionInput::Text(value) => Ok(advance(Some((awaited, value)))),
        SessionInput::Skip(field) if field == awaited => Ok(advance(None)),
        SessionInput::Clear(field) if field == awaited => Ok(advance(Some((awaited, String::new())))),
        SessionInput::Skip(field) | SessionInput::Clear(field) => Err(DomainError::UnexpectedInput(
            format!("expected the {awaited}, not the {field}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_writes_awaited_field_and_advances() {
        let step = transition(SessionState::AwaitingTitle, SessionInput::Text("Fix fence".into()))
            .unwrap();

        assert_eq!(step.next, SessionState::AwaitingDescription);
        assert_eq!(step.write, Some((QuestField::Title, "Fix fence".to_owned())));
        assert!(!step.cancelled);
    }

    #[test]
    fn test_skip_advances_without_writing() {
        let step = transition(
            SessionState::AwaitingDescription,
            SessionInput::Skip(QuestField::Description),
        )
        .unwrap();

        assert_eq!(step.next, SessionState::AwaitingReward);
        assert_eq!(step.write, None);
    }

    #[test]
    fn test_clear_writes_empty_value() {
        let step = transition(
            SessionState::AwaitingReward,
            SessionInput::Clear(QuestField::Reward),
        )
        .unwrap();

        assert_eq!(step.next, SessionState::Idle);
        assert_eq!(step.write, Some((QuestField::Reward, String::new())));
    }

    #[test]
    fn test_reward_is_terminal() {
        let step = transition(SessionState::AwaitingReward, SessionInput::Text("Pizza".into()))
            .unwrap();

        assert_eq!(step.next, SessionState::Idle);
        assert!(!step.cancelled);
    }

    #[test]
    fn test_cancel_from_any_awaiting_state() {
        for state in [
            SessionState::AwaitingTitle,
            SessionState::AwaitingDescription,
            SessionState::AwaitingReward,
        ] {
            let step = transition(state, SessionInput::Cancel).unwrap();

            assert_eq!(step.next, SessionState::Idle);
            assert_eq!(step.write, None);
            assert!(step.cancelled);
        }
    }

    #[test]
    fn test_mismatched_skip_is_rejected() {
        let result = transition(
            SessionState::AwaitingTitle,
            SessionInput::Skip(QuestField::Description),
        );

        match result {
            Err(DomainError::UnexpectedInput(msg)) => {
                assert_eq!(msg, "expected the title, not the description");
            }
            other => panic!("expected UnexpectedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_idle_rejects_everything() {
        let result = transition(SessionState::Idle, SessionInput::Text("hello".into()));

        assert!(matches!(result, Err(DomainError::UnexpectedInput(_))));
    }
}

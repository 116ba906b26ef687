//! What the router hands back to the host.

use chrono::{DateTime, Utc};
use questboard_core::ids::UserId;
use questboard_core::notification::{Button, Notification};
use serde::Serialize;

/// How the transport should show a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyMode {
    /// Send a new message.
    New,
    /// Replace the message whose button was pressed.
    EditInPlace,
}

/// The message shown to the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// HTML-formatted text.
    pub text: String,
    /// Button rows.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Vec<Button>>,
    /// New message or in-place edit.
    pub mode: ReplyMode,
}

impl Reply {
    /// A new message without buttons.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
            mode: ReplyMode::New,
        }
    }

    /// Replaces the button rows.
    #[must_use]
    pub fn with_buttons(mut self, buttons: Vec<Vec<Button>>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Marks the reply as an in-place edit.
    #[must_use]
    pub fn in_place(mut self) -> Self {
        self.mode = ReplyMode::EditInPlace;
        self
    }
}

/// One feedback submission, to be appended to the operators' log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    /// Who sent it.
    pub user: UserId,
    /// Their display name, empty if unknown.
    pub name: String,
    /// When it was received.
    pub received_at: DateTime<Utc>,
    /// The feedback itself.
    pub text: String,
}

/// Work the host must carry out after the engine lock is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append feedback to the log.
    RecordFeedback(FeedbackEntry),
    /// Save a snapshot and restart the process.
    Restart,
}

/// Result of handling one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Reply for the actor.
    pub reply: Reply,
    /// Messages for other participants, in delivery order.
    pub notifications: Vec<Notification>,
    /// Host-side effects.
    pub effects: Vec<Effect>,
}

impl Outcome {
    /// An outcome that only replies.
    #[must_use]
    pub fn reply(reply: Reply) -> Self {
        Self {
            reply,
            notifications: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Adds notifications.
    #[must_use]
    pub fn with_notifications(mut self, notifications: Vec<Notification>) -> Self {
        self.notifications.extend(notifications);
        self
    }

    /// Adds an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

impl From<Reply> for Outcome {
    fn from(reply: Reply) -> Self {
        Self::reply(reply)
    }
}

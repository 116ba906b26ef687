//! Outbound messages and the delivery seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::callback::CallbackToken;
use crate::ids::UserId;

/// An inline button: a label plus the token sent back when it is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Text shown on the button.
    pub label: String,
    /// Token delivered back to the router on press.
    pub callback: CallbackToken,
}

impl Button {
    /// Creates a button.
    #[must_use]
    pub fn new(label: impl Into<String>, callback: CallbackToken) -> Self {
        Self {
            label: label.into(),
            callback,
        }
    }
}

/// A message addressed to one participant as a side effect of a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Who receives the message.
    pub recipient: UserId,
    /// Message body.
    pub text: String,
    /// Optional button rows attached to the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Vec<Button>>,
}

impl Notification {
    /// Creates a plain-text notification.
    #[must_use]
    pub fn text(recipient: UserId, text: impl Into<String>) -> Self {
        Self {
            recipient,
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// Attaches a single-button row.
    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.push(vec![button]);
        self
    }
}

/// Why a single notification could not be delivered.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The transport cannot reach the recipient (blocked the bot, left, ...).
    #[error("recipient {0} is unreachable")]
    Unreachable(UserId),

    /// The transport refused the message.
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// Transport-side sink for outbound notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

//! Inputs accepted while a session is active.

use questboard_board::domain::entities::QuestField;

/// One message from the user while a create/edit flow is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// Free text: the new value for the awaited field.
    Text(String),
    /// Keep the stored value of the named field and move on.
    Skip(QuestField),
    /// Empty the named field and move on.
    Clear(QuestField),
    /// Abandon the flow.
    Cancel,
}

impl SessionInput {
    /// Short name for logging.
    #[must_use]
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Text(_) => "session.text",
            Self::Skip(_) => "session.skip",
            Self::Clear(_) => "session.clear",
            Self::Cancel => "session.cancel",
        }
    }
}

//! Button callback tokens.
//!
//! Tokens are comma-separated: `VERB,ownerId,questId` for quest-scoped verbs,
//! `DISPLAY,ownerId` for a whole board and a bare `SHOWALL`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::ids::{QuestId, UserId};

/// Structured payload carried by an inline button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackToken {
    /// Show the full text of a quest.
    Show { owner: UserId, quest: QuestId },
    /// Accept or drop a quest.
    Toggle { owner: UserId, quest: QuestId },
    /// Delete one of the actor's quests.
    Delete { owner: UserId, quest: QuestId },
    /// Archive one of the actor's quests.
    Archive { owner: UserId, quest: QuestId },
    /// Start editing one of the actor's quests.
    Edit { owner: UserId, quest: QuestId },
    /// List who accepted a quest.
    List { owner: UserId, quest: QuestId },
    /// Display a user's board.
    Display { owner: UserId },
    /// Display every quest on the board.
    ShowAll,
}

impl CallbackToken {
    fn verb(&self) -> &'static str {
        match self {
            Self::Show { .. } => "SHOW",
            Self::Toggle { .. } => "TOGGLE",
            Self::Delete { .. } => "DELETE",
            Self::Archive { .. } => "ARCHIVE",
            Self::Edit { .. } => "EDIT",
            Self::List { .. } => "LIST",
            Self::Display { .. } => "DISPLAY",
            Self::ShowAll => "SHOWALL",
        }
    }
}

impl fmt::Display for CallbackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = self.verb();
        match self {
            Self::Show { owner, quest }
            | Self::Toggle { owner, quest }
            | Self::Delete { owner, quest }
            | Self::Archive { owner, quest }
            | Self::Edit { owner, quest }
            | Self::List { owner, quest } => write!(f, "{verb},{owner},{quest}"),
            Self::Display { owner } => write!(f, "{verb},{owner}"),
            Self::ShowAll => f.write_str(verb),
        }
    }
}

impl FromStr for CallbackToken {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::MalformedCallback(raw.to_owned());
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

        let verb = parts[0].to_ascii_uppercase();
        let owner = |field: &str| field.parse::<UserId>().map_err(|_| malformed());
        let quest = |field: &str| field.parse::<QuestId>().map_err(|_| malformed());

        match (verb.as_str(), parts.len()) {
            ("SHOWALL", 1) => Ok(Self::ShowAll),
            ("DISPLAY", 2) => Ok(Self::Display {
                owner: owner(parts[1])?,
            }),
            (verb, 3) => {
                let owner = owner(parts[1])?;
                let quest = quest(parts[2])?;
                match verb {
                    "SHOW" => Ok(Self::Show { owner, quest }),
                    "TOGGLE" => Ok(Self::Toggle { owner, quest }),
                    "DELETE" => Ok(Self::Delete { owner, quest }),
                    "ARCHIVE" => Ok(Self::Archive { owner, quest }),
                    "EDIT" => Ok(Self::Edit { owner, quest }),
                    "LIST" => Ok(Self::List { owner, quest }),
                    _ => Err(malformed()),
                }
            }
            _ => Err(malformed()),
        }
    }
}

impl Serialize for CallbackToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CallbackToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

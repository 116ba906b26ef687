//! Identifiers for participants and quests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque participant identifier supplied by the chat transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Stable quest identifier.
///
/// Assigned from a monotonic counter when the quest is created and never
/// reused, so a reference rendered into an old button keeps pointing at the
/// same quest (or at nothing) after other quests are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub u64);

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_user_id_parses_negative_group_style_ids() {
        assert_eq!("-1001234".parse::<UserId>().unwrap(), UserId(-1_001_234));
    }

    #[test]
    fn test_quest_id_rejects_negative_values() {
        assert!("-3".parse::<QuestId>().is_err());
    }

    #[test]
    fn test_user_id_works_as_json_map_key() {
        let mut map = BTreeMap::new();
        map.insert(UserId(42), "Ada".to_owned());

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"42":"Ada"}"#);

        let back: BTreeMap<UserId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tournament, either a list entry or the full `tournaments/{tag}` view
///
/// List endpoints leave `members` and `creator` out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub tag: Option<String>,
    #[serde(rename = "type")]
    pub tournament_type: Option<String>,
    pub status: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub max_capacity: Option<u32>,
    pub preparation_duration: Option<u64>,
    pub duration: Option<u64>,
    pub create_time: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub player_count: Option<u32>,
    pub creator: Option<TournamentCreator>,
    #[serde(default)]
    pub members: Vec<Value>,
}

impl Tournament {
    pub fn creator_name(&self) -> Option<&str> {
        self.creator.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn creator_tag(&self) -> Option<&str> {
        self.creator.as_ref().and_then(|c| c.tag.as_deref())
    }

    pub fn is_full(&self) -> bool {
        matches!((self.capacity, self.max_capacity), (Some(c), Some(m)) if c >= m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentCreator {
    pub tag: Option<String>,
    pub name: Option<String>,
}

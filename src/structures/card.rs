use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A card, either from the card catalogue or a player's collection
///
/// Collection entries also carry `level`, `count` and the upgrade progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: Option<String>,
    pub id: Option<u64>,
    pub key: Option<String>,
    pub max_level: Option<u32>,
    pub icon: Option<String>,
    pub elixir: Option<u32>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub rarity: Option<String>,
    pub arena: Option<u32>,
    pub description: Option<String>,
    pub level: Option<u32>,
    pub count: Option<u32>,
    /// A number, or `"Maxed"` once the card cannot be upgraded
    pub required_for_upgrade: Option<Value>,
    pub left_to_upgrade: Option<Value>,
}

impl Card {
    pub fn is_maxed(&self) -> bool {
        match (&self.level, &self.max_level) {
            (Some(level), Some(max)) => level >= max,
            _ => matches!(&self.required_for_upgrade, Some(Value::String(s)) if s == "Maxed"),
        }
    }
}

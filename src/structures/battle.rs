use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recent battles of a player or clan
///
/// The API answers with a bare array; it is wrapped so the list can be cached
/// as one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleLog {
    pub battles: Vec<Battle>,
}

impl BattleLog {
    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }

    pub fn wins(&self) -> usize {
        self.battles.iter().filter(|b| b.winner.unwrap_or(0) > 0).count()
    }
}

pub type PlayerBattles = BattleLog;
pub type ClanBattles = BattleLog;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    #[serde(rename = "type")]
    pub battle_type: Option<String>,
    pub challenge_type: Option<String>,
    pub mode: Option<BattleMode>,
    pub win_count_before: Option<u32>,
    pub utc_time: Option<i64>,
    pub deck_type: Option<String>,
    pub team_size: Option<u32>,
    /// Positive when the team won, negative when it lost, 0 for a draw
    pub winner: Option<i32>,
    pub team_crowns: Option<u32>,
    pub opponent_crowns: Option<u32>,
    #[serde(default)]
    pub team: Vec<Value>,
    #[serde(default)]
    pub opponent: Vec<Value>,
    pub arena: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleMode {
    pub name: Option<String>,
    pub deck: Option<String>,
    pub card_levels: Option<String>,
    pub overtime_seconds: Option<u32>,
    pub players: Option<String>,
    pub same_deck: Option<bool>,
}

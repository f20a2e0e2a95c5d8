use super::card::Card;
use super::Badge;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A player profile (`player/{tag}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub tag: Option<String>,
    pub name: Option<String>,
    pub trophies: Option<u32>,
    pub rank: Option<u32>,
    pub clan: Option<PlayerClan>,
    pub arena: Option<PlayerArena>,
    pub stats: Option<PlayerStats>,
    pub games: Option<PlayerGames>,
    pub league_statistics: Option<Value>,
    pub deck_link: Option<String>,
    #[serde(default)]
    pub current_deck: Vec<Card>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub achievements: Vec<Value>,
}

impl Player {
    pub fn clan_tag(&self) -> Option<&str> {
        self.clan.as_ref().and_then(|c| c.tag.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerClan {
    pub tag: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub donations: Option<u32>,
    pub badge: Option<Badge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerArena {
    pub name: Option<String>,
    pub arena: Option<String>,
    pub arena_id: Option<u32>,
    pub trophy_limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub clan_cards_collected: Option<u64>,
    pub tournament_cards_won: Option<u64>,
    pub max_trophies: Option<u32>,
    pub three_crown_wins: Option<u32>,
    pub cards_found: Option<u32>,
    pub favorite_card: Option<Card>,
    pub total_donations: Option<u64>,
    pub challenge_max_wins: Option<u32>,
    pub challenge_cards_won: Option<u64>,
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGames {
    pub total: Option<u32>,
    pub tournament_games: Option<u32>,
    pub wins: Option<u32>,
    pub war_day_wins: Option<u32>,
    pub wins_percent: Option<f64>,
    pub losses: Option<u32>,
    pub losses_percent: Option<f64>,
    pub draws: Option<u32>,
    pub draws_percent: Option<f64>,
}

/// Upcoming chest cycle (`player/{tag}/chests`)
///
/// Positions count from the next chest (0 = next).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerChests {
    #[serde(default)]
    pub upcoming: Vec<String>,
    pub super_magical: Option<u32>,
    pub magical: Option<u32>,
    pub legendary: Option<u32>,
    pub epic: Option<u32>,
    pub giant: Option<u32>,
}

use super::Badge;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Clan profile (`clan/{tag}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clan {
    pub tag: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub clan_type: Option<String>,
    pub score: Option<u32>,
    pub member_count: Option<u32>,
    pub required_score: Option<u32>,
    pub donations: Option<u32>,
    pub clan_chest: Option<Value>,
    pub badge: Option<Badge>,
    pub location: Option<Location>,
    pub tracking: Option<ClanTracking>,
    #[serde(default)]
    pub members: Vec<ClanMember>,
}

impl Clan {
    pub fn member(&self, tag: &str) -> Option<&ClanMember> {
        self.members.iter().find(|m| m.tag.as_deref() == Some(tag))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMember {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub rank: Option<u32>,
    pub previous_rank: Option<u32>,
    pub role: Option<String>,
    #[serde(rename = "expLevel")]
    pub level: Option<u32>,
    pub trophies: Option<u32>,
    pub clan_chest_crowns: Option<u32>,
    pub donations: Option<u32>,
    pub donations_received: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub is_country: Option<bool>,
    pub code: Option<String>,
}

/// Tracking state of a clan on RoyaleAPI (`clan/{tag}/tracking`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanTracking {
    pub tag: Option<String>,
    pub active: Option<bool>,
    pub available: Option<bool>,
    pub snapshot_count: Option<u32>,
    pub legible: Option<bool>,
}

/// Current clan war (`clan/{tag}/war`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanWar {
    pub state: Option<String>,
    pub war_end_time: Option<i64>,
    pub collection_end_time: Option<i64>,
    pub clan: Option<Value>,
    #[serde(default)]
    pub participants: Vec<WarParticipant>,
    #[serde(default)]
    pub standings: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarParticipant {
    pub tag: Option<String>,
    pub name: Option<String>,
    pub cards_earned: Option<u32>,
    pub battles_played: Option<u32>,
    pub wins: Option<u32>,
    pub collection_day_battles_played: Option<u32>,
}

/// Finished wars, newest first (`clan/{tag}/warlog`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClanWarLog {
    pub entries: Vec<WarLogEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarLogEntry {
    pub created_date: Option<i64>,
    pub season_number: Option<u32>,
    #[serde(default)]
    pub participants: Vec<WarParticipant>,
    #[serde(default)]
    pub standings: Vec<Value>,
}

/// Tracked clan snapshots keyed by date (`clan/{tag}/history[/weekly]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClanHistory {
    pub snapshots: BTreeMap<String, Value>,
}

impl ClanHistory {
    pub fn latest(&self) -> Option<(&String, &Value)> {
        self.snapshots.iter().next_back()
    }
}

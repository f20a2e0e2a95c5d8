//! Typed RoyaleAPI payloads
//!
//! Every field the API may omit is an `Option` (or an empty `Vec`), so a
//! mapped object never carries an undefined member. A field of the wrong JSON
//! type fails the whole mapping with a `DataError` instead of being dropped.

pub mod battle;
pub mod card;
pub mod clan;
pub mod player;
pub mod tournament;

pub use battle::{Battle, BattleLog, BattleMode, ClanBattles, PlayerBattles};
pub use card::Card;
pub use clan::{
    Clan, ClanHistory, ClanMember, ClanTracking, ClanWar, ClanWarLog, Location, WarLogEntry,
    WarParticipant,
};
pub use player::{Player, PlayerArena, PlayerChests, PlayerClan, PlayerGames, PlayerStats};
pub use tournament::{Tournament, TournamentCreator};

use crate::errors::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: Option<String>,
    pub category: Option<String>,
    pub id: Option<u64>,
    pub image: Option<String>,
}

/// One entry of `popular/decks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularDeck {
    #[serde(default, alias = "cards")]
    pub decks: Vec<Card>,
    pub popularity: Option<u32>,
}

/// Usage statistics of the API key (`auth/stats`)
///
/// The server does not document this payload, so the fields are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyStats {
    pub fields: Map<String, Value>,
}

impl KeyStats {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Map a raw response into a typed payload
pub fn from_raw<T: DeserializeOwned>(endpoint: &str, raw: Value) -> ClientResult<T> {
    serde_json::from_value(raw).map_err(|e| ClientError::parse_error(endpoint, e.to_string()))
}

/// Map a raw JSON array into a list of typed payloads
pub fn from_raw_list<T: DeserializeOwned>(endpoint: &str, raw: Value) -> ClientResult<Vec<T>> {
    match raw {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| {
                    ClientError::parse_error(endpoint, format!("item {}: {}", index, e))
                })
            })
            .collect(),
        other => Err(ClientError::parse_error(
            endpoint,
            format!("expected an array, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Endpoint paths, relative to the API base URL
//!
//! Tags and locations must already be normalized.

pub fn player(tag: &str) -> String {
    format!("player/{}", tag)
}

pub fn player_battles(tag: &str) -> String {
    format!("player/{}/battles", tag)
}

pub fn player_chests(tag: &str) -> String {
    format!("player/{}/chests", tag)
}

/// Global leaderboard when `location` is `None`
pub fn top_players(location: Option<&str>) -> String {
    match location {
        Some(loc) => format!("top/players/{}", loc),
        None => "top/players".to_string(),
    }
}

pub const POPULAR_PLAYERS: &str = "popular/players";

pub fn clan(tag: &str) -> String {
    format!("clan/{}", tag)
}

pub fn clan_battles(tag: &str) -> String {
    format!("clan/{}/battles", tag)
}

pub fn clan_war(tag: &str) -> String {
    format!("clan/{}/war", tag)
}

pub fn clan_war_log(tag: &str) -> String {
    format!("clan/{}/warlog", tag)
}

pub fn clan_history(tag: &str) -> String {
    format!("clan/{}/history", tag)
}

pub fn clan_weekly_history(tag: &str) -> String {
    format!("clan/{}/history/weekly", tag)
}

pub fn clan_tracking(tag: &str) -> String {
    format!("clan/{}/tracking", tag)
}

pub fn top_clans(location: Option<&str>) -> String {
    match location {
        Some(loc) => format!("top/clans/{}", loc),
        None => "top/clans".to_string(),
    }
}

pub const POPULAR_CLANS: &str = "popular/clans";
pub const CLAN_SEARCH: &str = "clan/search";

pub const OPEN_TOURNAMENTS: &str = "tournaments/open";
pub const KNOWN_TOURNAMENTS: &str = "tournaments/known";
pub const POPULAR_TOURNAMENTS: &str = "popular/tournaments";

pub fn tournament(tag: &str) -> String {
    format!("tournaments/{}", tag)
}

pub const POPULAR_DECKS: &str = "popular/decks";
pub const KEY_STATS: &str = "auth/stats";
pub const ENDPOINTS: &str = "endpoints";

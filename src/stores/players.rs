use super::Orchestrator;
use crate::apis::royale::endpoints;
use crate::apis::{ApiRequest, RequestOptions};
use crate::cache::{CacheStats, ExpiringStore};
use crate::errors::ClientResult;
use crate::structures::{Player, PlayerBattles, PlayerChests};
use crate::tags::normalize_location;
use std::sync::Arc;

/// Player profiles, battle logs and chest cycles
pub struct PlayerStore {
    orchestrator: Arc<Orchestrator>,
    profiles: ExpiringStore<Arc<Player>>,
    battles: ExpiringStore<Arc<PlayerBattles>>,
    chests: ExpiringStore<Arc<PlayerChests>>,
}

impl PlayerStore {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            profiles: orchestrator.new_store("player_profiles"),
            battles: orchestrator.new_store("player_battles"),
            chests: orchestrator.new_store("player_chests"),
            orchestrator,
        }
    }

    pub async fn get_profile(
        &self,
        tag: &str,
        options: &RequestOptions,
    ) -> ClientResult<Arc<Player>> {
        self.orchestrator
            .fetch_cached(&self.profiles, tag, endpoints::player, options)
            .await
    }

    pub async fn get_battles(
        &self,
        tag: &str,
        options: &RequestOptions,
    ) -> ClientResult<Arc<PlayerBattles>> {
        self.orchestrator
            .fetch_cached(&self.battles, tag, endpoints::player_battles, options)
            .await
    }

    pub async fn get_chests(
        &self,
        tag: &str,
        options: &RequestOptions,
    ) -> ClientResult<Arc<PlayerChests>> {
        self.orchestrator
            .fetch_cached(&self.chests, tag, endpoints::player_chests, options)
            .await
    }

    /// Leaderboard of a location, or the global one for `None`
    pub async fn get_top(
        &self,
        location: Option<&str>,
        options: &RequestOptions,
    ) -> ClientResult<Vec<Player>> {
        let location = location.map(normalize_location).transpose()?;
        let fields = options.validate()?;
        let request = ApiRequest::new(endpoints::top_players(location.as_deref()), &fields);
        self.orchestrator.fetch_collection(request).await
    }

    pub async fn get_popular(&self, options: &RequestOptions) -> ClientResult<Vec<Player>> {
        let fields = options.validate()?;
        let request = ApiRequest::new(endpoints::POPULAR_PLAYERS, &fields);
        self.orchestrator.fetch_collection(request).await
    }

    pub fn cache_stats(&self) -> Vec<CacheStats> {
        vec![
            self.profiles.get_stats(),
            self.battles.get_stats(),
            self.chests.get_stats(),
        ]
    }

    /// Drop every cached player resource
    pub fn clear(&self) {
        self.profiles.clear();
        self.battles.clear();
        self.chests.clear();
    }
}

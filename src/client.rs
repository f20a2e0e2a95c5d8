/// The client facade: one instance owns its fetcher, rate limiter, clock and
/// every resource cache
use crate::apis::royale::endpoints;
use crate::apis::{
    ApiFetcher, ApiRequest, ApiStats, QueryFields, RateLimitInfo, RateLimiter, RequestOptions,
    RoyaleApiClient,
};
use crate::cache::CacheStats;
use crate::clock::{Clock, SystemClock};
use crate::config::ClientConfig;
use crate::errors::ClientResult;
use crate::logger::{self, LogTag};
use crate::stores::{ClanStore, Orchestrator, PlayerStore, TournamentStore};
use crate::structures::{KeyStats, PopularDeck};
use crate::tags::normalize_tag;
use std::sync::Arc;

pub struct RoyaleClient {
    config: ClientConfig,
    orchestrator: Arc<Orchestrator>,
    players: PlayerStore,
    clans: ClanStore,
    tournaments: TournamentStore,
}

impl RoyaleClient {
    /// Client talking to RoyaleAPI over HTTP with the wall clock
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let fetcher = Arc::new(RoyaleApiClient::new(&config)?);
        Ok(Self::with_fetcher(fetcher, config, Arc::new(SystemClock)))
    }

    /// Client over any fetcher and clock
    pub fn with_fetcher(
        fetcher: Arc<dyn ApiFetcher>,
        config: ClientConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = config.cache_config();
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit,
            config.rate_window(),
            Arc::clone(&clock),
        ));
        let orchestrator = Arc::new(Orchestrator::new(
            fetcher,
            limiter,
            clock,
            cache.capacity,
            cache.ttl,
        ));

        logger::debug(
            LogTag::Client,
            &format!(
                "Client ready: cache {:?}, ttl {}s, {} requests / {}ms",
                cache.capacity,
                cache.ttl.as_secs(),
                config.rate_limit,
                config.rate_window_ms
            ),
        );

        Self {
            players: PlayerStore::new(Arc::clone(&orchestrator)),
            clans: ClanStore::new(Arc::clone(&orchestrator)),
            tournaments: TournamentStore::new(Arc::clone(&orchestrator)),
            orchestrator,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn players(&self) -> &PlayerStore {
        &self.players
    }

    pub fn clans(&self) -> &ClanStore {
        &self.clans
    }

    pub fn tournaments(&self) -> &TournamentStore {
        &self.tournaments
    }

    pub async fn get_popular_decks(
        &self,
        options: &RequestOptions,
    ) -> ClientResult<Vec<PopularDeck>> {
        let fields = options.validate()?;
        self.orchestrator
            .fetch_collection(ApiRequest::new(endpoints::POPULAR_DECKS, &fields))
            .await
    }

    /// Usage statistics of the configured token
    pub async fn get_key_stats(&self) -> ClientResult<KeyStats> {
        self.orchestrator
            .fetch_object(ApiRequest::new(endpoints::KEY_STATS, &QueryFields::All))
            .await
    }

    /// Endpoint paths the server currently advertises
    pub async fn get_endpoints(&self) -> ClientResult<Vec<String>> {
        self.orchestrator
            .fetch_collection(ApiRequest::new(endpoints::ENDPOINTS, &QueryFields::All))
            .await
    }

    /// Canonical form of a player, clan or tournament tag
    pub fn verify_tag(&self, raw: &str) -> ClientResult<String> {
        Ok(normalize_tag(raw)?)
    }

    /// Server-side limits reported by the last response
    pub fn rate_limits(&self) -> RateLimitInfo {
        self.orchestrator.fetcher().rate_limits()
    }

    /// Local sliding-window governor
    pub fn rate_limiter(&self) -> &RateLimiter {
        self.orchestrator.limiter()
    }

    pub fn api_stats(&self) -> Option<ApiStats> {
        self.orchestrator.fetcher().get_stats()
    }

    pub fn cache_stats(&self) -> Vec<CacheStats> {
        let mut stats = self.players.cache_stats();
        stats.extend(self.clans.cache_stats());
        stats.extend(self.tournaments.cache_stats());
        stats
    }

    /// Empty every resource cache
    pub fn clear_cache(&self) {
        self.players.clear();
        self.clans.clear();
        self.tournaments.clear();
        logger::debug(LogTag::Cache, "All resource caches cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::errors::{ClientError, ConfigurationError, TagError};
    use crate::stores::testing::FakeFetcher;
    use serde_json::json;

    fn client(fetcher: Arc<FakeFetcher>) -> RoyaleClient {
        RoyaleClient::with_fetcher(fetcher, ClientConfig::default(), Arc::new(ManualClock::new()))
    }

    #[test]
    fn test_new_requires_token() {
        let err = RoyaleClient::new(ClientConfig::default()).err().unwrap();
        assert_eq!(err, ClientError::Configuration(ConfigurationError::MissingToken));
    }

    #[test]
    fn test_verify_tag() {
        let client = client(Arc::new(FakeFetcher::default()));
        assert_eq!(client.verify_tag("#2ppo").unwrap(), "2PP0");
        assert_eq!(
            client.verify_tag("").unwrap_err(),
            ClientError::InvalidKey(TagError::Empty)
        );
    }

    #[tokio::test]
    async fn test_misc_endpoints() {
        let fetcher = Arc::new(
            FakeFetcher::default()
                .with("popular/decks", json!([{"decks": [{"name": "Zap"}], "popularity": 3}]))
                .with("auth/stats", json!({"requestCount": 40}))
                .with("endpoints", json!(["/player/:tag", "/clan/:tag"])),
        );
        let client = client(fetcher.clone());

        let decks = client.get_popular_decks(&RequestOptions::none()).await.unwrap();
        assert_eq!(decks[0].popularity, Some(3));
        let stats = client.get_key_stats().await.unwrap();
        assert_eq!(stats.get("requestCount"), Some(&json!(40)));
        assert_eq!(client.get_endpoints().await.unwrap().len(), 2);
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(client.rate_limiter().in_window(), 3);
    }

    #[tokio::test]
    async fn test_cache_stats_cover_every_store() {
        let fetcher = Arc::new(FakeFetcher::default().with("clan/2CCCP", json!({"tag": "2CCCP"})));
        let client = client(fetcher);

        client.clans().get_data("2CCCP", &RequestOptions::none()).await.unwrap();
        let stats = client.cache_stats();

        assert_eq!(stats.len(), 10);
        let clan_data = stats.iter().find(|s| s.name == "clan_data").unwrap();
        assert_eq!(clan_data.total_entries, 1);

        client.clear_cache();
        assert!(client.cache_stats().iter().all(|s| s.total_entries == 0));
    }

    #[test]
    fn test_fake_fetcher_has_no_remote_limits() {
        let client = client(Arc::new(FakeFetcher::default()));
        assert_eq!(client.rate_limits(), RateLimitInfo::default());
        assert!(client.api_stats().is_none());
    }
}

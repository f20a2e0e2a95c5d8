use super::Orchestrator;
use crate::apis::royale::endpoints;
use crate::apis::{ApiRequest, QueryFields, RequestOptions};
use crate::cache::{CacheStats, ExpiringStore};
use crate::errors::{ClientError, ClientResult};
use crate::structures::{Clan, ClanBattles, ClanHistory, ClanTracking, ClanWar, ClanWarLog};
use crate::tags::{normalize_location, normalize_tag};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Criteria for `clan/search`; at least one must be set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClanSearch {
    pub name: Option<String>,
    pub location_id: Option<u64>,
    pub min_members: Option<u32>,
    pub max_members: Option<u32>,
    pub min_score: Option<u32>,
}

impl ClanSearch {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Trimmed name, `None` when unset or blank
    fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.name().is_none()
            && self.location_id.is_none()
            && self.min_members.is_none()
            && self.max_members.is_none()
            && self.min_score.is_none()
        {
            return Err(ClientError::invalid_options(
                "clan search needs at least one criterion",
            ));
        }

        if let (Some(min), Some(max)) = (self.min_members, self.max_members) {
            if min > max {
                return Err(ClientError::invalid_options(format!(
                    "min_members ({}) is greater than max_members ({})",
                    min, max
                )));
            }
        }

        Ok(())
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .with_optional_param("name", self.name())
            .with_optional_param("locationId", self.location_id)
            .with_optional_param("minMembers", self.min_members)
            .with_optional_param("maxMembers", self.max_members)
            .with_optional_param("score", self.min_score)
    }
}

/// Clan profiles, battles, wars and tracked history
pub struct ClanStore {
    orchestrator: Arc<Orchestrator>,
    data: ExpiringStore<Arc<Clan>>,
    battles: ExpiringStore<Arc<ClanBattles>>,
    war: ExpiringStore<Arc<ClanWar>>,
    war_log: ExpiringStore<Arc<ClanWarLog>>,
    history: ExpiringStore<Arc<ClanHistory>>,
    weekly_history: ExpiringStore<Arc<ClanHistory>>,
}

impl ClanStore {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            data: orchestrator.new_store("clan_data"),
            battles: orchestrator.new_store("clan_battles"),
            war: orchestrator.new_store("clan_war"),
            war_log: orchestrator.new_store("clan_war_log"),
            history: orchestrator.new_store("clan_history"),
            weekly_history: orchestrator.new_store("clan_weekly_history"),
            orchestrator,
        }
    }

    pub async fn get_data(&self, tag: &str, options: &RequestOptions) -> ClientResult<Arc<Clan>> {
        self.orchestrator
            .fetch_cached(&self.data, tag, endpoints::clan, options)
            .await
    }

    pub async fn get_battles(
        &self,
        tag: &str,
        options: &RequestOptions,
    ) -> ClientResult<Arc<ClanBattles>> {
        self.orchestrator
            .fetch_cached(&self.battles, tag, endpoints::clan_battles, options)
            .await
    }

    pub async fn get_war(&self, tag: &str, options: &RequestOptions) -> ClientResult<Arc<ClanWar>> {
        self.orchestrator
            .fetch_cached(&self.war, tag, endpoints::clan_war, options)
            .await
    }

    pub async fn get_war_log(
        &self,
        tag: &str,
        options: &RequestOptions,
    ) -> ClientResult<Arc<ClanWarLog>> {
        self.orchestrator
            .fetch_cached(&self.war_log, tag, endpoints::clan_war_log, options)
            .await
    }

    pub async fn get_war_history(
        &self,
        tag: &str,
        options: &RequestOptions,
    ) -> ClientResult<Arc<ClanHistory>> {
        self.orchestrator
            .fetch_cached(&self.history, tag, endpoints::clan_history, options)
            .await
    }

    pub async fn get_weekly_history(
        &self,
        tag: &str,
        options: &RequestOptions,
    ) -> ClientResult<Arc<ClanHistory>> {
        self.orchestrator
            .fetch_cached(&self.weekly_history, tag, endpoints::clan_weekly_history, options)
            .await
    }

    /// Live tracking state; always fetched
    pub async fn get_tracking(&self, tag: &str) -> ClientResult<ClanTracking> {
        let tag = normalize_tag(tag)?;
        let request = ApiRequest::new(endpoints::clan_tracking(&tag), &QueryFields::All);
        self.orchestrator.fetch_object(request).await
    }

    pub async fn get_top(
        &self,
        location: Option<&str>,
        options: &RequestOptions,
    ) -> ClientResult<Vec<Clan>> {
        let location = location.map(normalize_location).transpose()?;
        let fields = options.validate()?;
        let request = ApiRequest::new(endpoints::top_clans(location.as_deref()), &fields);
        self.orchestrator.fetch_collection(request).await
    }

    pub async fn get_popular(&self, options: &RequestOptions) -> ClientResult<Vec<Clan>> {
        let fields = options.validate()?;
        let request = ApiRequest::new(endpoints::POPULAR_CLANS, &fields);
        self.orchestrator.fetch_collection(request).await
    }

    pub async fn search(
        &self,
        criteria: &ClanSearch,
        options: &RequestOptions,
    ) -> ClientResult<Vec<Clan>> {
        criteria.validate()?;
        let fields = options.validate()?;
        let request = criteria.apply(ApiRequest::new(endpoints::CLAN_SEARCH, &fields));
        self.orchestrator.fetch_collection(request).await
    }

    pub fn cache_stats(&self) -> Vec<CacheStats> {
        vec![
            self.data.get_stats(),
            self.battles.get_stats(),
            self.war.get_stats(),
            self.war_log.get_stats(),
            self.history.get_stats(),
            self.weekly_history.get_stats(),
        ]
    }

    pub fn clear(&self) {
        self.data.clear();
        self.battles.clear();
        self.war.clear();
        self.war_log.clear();
        self.history.clear();
        self.weekly_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::RateLimiter;
    use crate::cache::CacheCapacity;
    use crate::clock::ManualClock;
    use crate::stores::testing::FakeFetcher;
    use serde_json::json;
    use std::time::Duration;

    fn store(fetcher: Arc<FakeFetcher>) -> ClanStore {
        let clock = Arc::new(ManualClock::new());
        let limiter = Arc::new(RateLimiter::new(5, Duration::from_millis(1000), clock.clone()));
        ClanStore::new(Arc::new(Orchestrator::new(
            fetcher,
            limiter,
            clock,
            CacheCapacity::from_size(25),
            Duration::from_secs(300),
        )))
    }

    #[tokio::test]
    async fn test_get_data_caches_by_normalized_tag() {
        let alpha = json!({"tag": "2CCCP", "name": "Alpha"});
        let fetcher = Arc::new(FakeFetcher::default().with("clan/2CCCP", alpha));
        let clans = store(fetcher.clone());

        let first = clans.get_data("2CCCP", &RequestOptions::none()).await.unwrap();
        let second = clans.get_data("#2cccp", &RequestOptions::none()).await.unwrap();

        assert_eq!(first.name.as_deref(), Some("Alpha"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_tracking_is_always_fetched() {
        let tracking = json!({"tag": "2CCCP", "active": true});
        let fetcher = Arc::new(FakeFetcher::default().with("clan/2CCCP/tracking", tracking));
        let clans = store(fetcher.clone());

        for _ in 0..3 {
            let tracking = clans.get_tracking("2CCCP").await.unwrap();
            assert_eq!(tracking.active, Some(true));
        }
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn test_history_stores_are_distinct() {
        let fetcher = Arc::new(
            FakeFetcher::default()
                .with("clan/2CCCP/history", json!({"2018-01-01": {"score": 1}}))
                .with("clan/2CCCP/history/weekly", json!({"2018-01-07": {"score": 2}})),
        );
        let clans = store(fetcher.clone());

        let daily = clans.get_war_history("2CCCP", &RequestOptions::none()).await.unwrap();
        let weekly = clans.get_weekly_history("2CCCP", &RequestOptions::none()).await.unwrap();

        assert_ne!(daily, weekly);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_search_query_parameters() {
        let fetcher =
            Arc::new(FakeFetcher::default().with("clan/search", json!([{"tag": "2CCCP"}])));
        let clans = store(fetcher.clone());
        let criteria = ClanSearch {
            name: Some(" royale ".to_string()),
            min_members: Some(10),
            ..ClanSearch::default()
        };

        let found = clans.search(&criteria, &RequestOptions::none()).await.unwrap();

        assert_eq!(found.len(), 1);
        let request = fetcher.last_request().unwrap();
        assert_eq!(
            request.query,
            vec![
                ("name".to_string(), "royale".to_string()),
                ("minMembers".to_string(), "10".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_rejects_empty_criteria() {
        let fetcher = Arc::new(FakeFetcher::default());
        let clans = store(fetcher.clone());

        let err = clans
            .search(&ClanSearch::by_name("   "), &RequestOptions::none())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidOptions { .. }));

        let inverted = ClanSearch {
            min_members: Some(40),
            max_members: Some(10),
            ..ClanSearch::default()
        };
        assert!(inverted.validate().is_err());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_drops_blank_name() {
        let fetcher =
            Arc::new(FakeFetcher::default().with("clan/search", json!([{"tag": "2CCCP"}])));
        let clans = store(fetcher.clone());
        let criteria = ClanSearch {
            name: Some("  ".to_string()),
            location_id: Some(57000249),
            ..ClanSearch::default()
        };

        clans.search(&criteria, &RequestOptions::none()).await.unwrap();

        let request = fetcher.last_request().unwrap();
        assert_eq!(
            request.query,
            vec![("locationId".to_string(), "57000249".to_string())]
        );
    }
}

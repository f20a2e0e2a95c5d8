use super::Orchestrator;
use crate::apis::royale::endpoints;
use crate::apis::{ApiRequest, RequestOptions};
use crate::cache::{CacheStats, ExpiringStore};
use crate::errors::ClientResult;
use crate::structures::Tournament;
use std::sync::Arc;

/// Tournament lists (always fresh) and single tournaments (cached by tag)
pub struct TournamentStore {
    orchestrator: Arc<Orchestrator>,
    info: ExpiringStore<Arc<Tournament>>,
}

impl TournamentStore {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            info: orchestrator.new_store("tournament_info"),
            orchestrator,
        }
    }

    pub async fn get_info(
        &self,
        tag: &str,
        options: &RequestOptions,
    ) -> ClientResult<Arc<Tournament>> {
        self.orchestrator
            .fetch_cached(&self.info, tag, endpoints::tournament, options)
            .await
    }

    pub async fn get_open_list(&self, options: &RequestOptions) -> ClientResult<Vec<Tournament>> {
        self.list(endpoints::OPEN_TOURNAMENTS, options).await
    }

    pub async fn get_known_list(&self, options: &RequestOptions) -> ClientResult<Vec<Tournament>> {
        self.list(endpoints::KNOWN_TOURNAMENTS, options).await
    }

    pub async fn get_popular_list(
        &self,
        options: &RequestOptions,
    ) -> ClientResult<Vec<Tournament>> {
        self.list(endpoints::POPULAR_TOURNAMENTS, options).await
    }

    async fn list(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> ClientResult<Vec<Tournament>> {
        let fields = options.validate()?;
        self.orchestrator
            .fetch_collection(ApiRequest::new(endpoint, &fields))
            .await
    }

    pub fn cache_stats(&self) -> Vec<CacheStats> {
        vec![self.info.get_stats()]
    }

    pub fn clear(&self) {
        self.info.clear();
    }
}

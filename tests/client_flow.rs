use async_trait::async_trait;
use parking_lot::Mutex;
use royale_client::errors::{RateLimitError, TagError};
use royale_client::{
    ApiFetcher, ApiRequest, ClientConfig, ClientError, ClientResult, ManualClock, RequestOptions,
    RoyaleClient,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Answers every request with a minimal payload, counting calls
#[derive(Default)]
struct CountingFetcher {
    endpoints: Mutex<Vec<String>>,
    fail: Mutex<bool>,
}

impl CountingFetcher {
    fn calls(&self) -> usize {
        self.endpoints.lock().len()
    }

    fn set_failing(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

#[async_trait]
impl ApiFetcher for CountingFetcher {
    async fn fetch_json(&self, request: &ApiRequest) -> ClientResult<Value> {
        self.endpoints.lock().push(request.endpoint.clone());
        // Suspend once, like a real round trip, so concurrent reads interleave
        tokio::task::yield_now().await;
        if *self.fail.lock() {
            return Err(ClientError::network_error("connection reset"));
        }
        if request.endpoint.starts_with("top/")
            || request.endpoint.starts_with("popular/")
            || request.endpoint.ends_with("/battles")
        {
            return Ok(json!([{"tag": "2PP"}]));
        }
        let tag = request.endpoint.split('/').nth(1).unwrap_or_default();
        Ok(json!({"tag": tag}))
    }
}

fn setup(cache_size: i64) -> (RoyaleClient, Arc<CountingFetcher>, Arc<ManualClock>) {
    setup_with(ClientConfig {
        cache_size,
        ..Default::default()
    })
}

fn setup_with(config: ClientConfig) -> (RoyaleClient, Arc<CountingFetcher>, Arc<ManualClock>) {
    let fetcher = Arc::new(CountingFetcher::default());
    let clock = Arc::new(ManualClock::new());
    let client = RoyaleClient::with_fetcher(fetcher.clone(), config, clock.clone());
    (client, fetcher, clock)
}

#[tokio::test]
async fn test_get_data_fetches_once_within_ttl() {
    let (client, fetcher, clock) = setup(25);

    let clan = client.clans().get_data("2CCCP", &RequestOptions::none()).await.unwrap();
    assert_eq!(clan.tag.as_deref(), Some("2CCCP"));
    assert_eq!(fetcher.calls(), 1);

    clock.advance(Duration::from_secs(299));
    client.clans().get_data("2CCCP", &RequestOptions::none()).await.unwrap();
    assert_eq!(fetcher.calls(), 1);

    clock.advance(Duration::from_secs(1));
    client.clans().get_data("2CCCP", &RequestOptions::none()).await.unwrap();
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_invalid_tag_fails_before_any_fetch() {
    let (client, fetcher, _clock) = setup(25);

    let err = client
        .clans()
        .get_data("invalid#tag!", &RequestOptions::none())
        .await
        .unwrap_err();

    match err {
        ClientError::InvalidKey(TagError::InvalidCharacter { character, .. }) => {
            assert_eq!(character, 'I')
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(fetcher.calls(), 0);
    assert_eq!(client.rate_limiter().in_window(), 0);

    let err = client.players().get_profile("", &RequestOptions::none()).await.unwrap_err();
    assert_eq!(err, ClientError::InvalidKey(TagError::Empty));
}

#[tokio::test]
async fn test_conflicting_options_fail_before_any_fetch() {
    let (client, fetcher, _clock) = setup(25);
    let options = RequestOptions {
        keys: Some(vec!["name".to_string()]),
        exclude: Some(vec!["members".to_string()]),
    };

    let err = client.clans().get_data("2CCCP", &options).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidOptions { .. }));

    let err = client.players().get_top(Some("US"), &options).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidOptions { .. }));

    assert_eq!(fetcher.calls(), 0);
    assert_eq!(client.rate_limiter().in_window(), 0);
}

#[tokio::test]
async fn test_conflicting_options_fail_even_when_cached() {
    let (client, fetcher, _clock) = setup(25);
    client.clans().get_data("2CCCP", &RequestOptions::none()).await.unwrap();

    let options = RequestOptions {
        keys: Some(vec!["name".to_string()]),
        exclude: Some(vec!["members".to_string()]),
    };
    assert!(client.clans().get_data("2CCCP", &options).await.is_err());
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_sixth_request_in_window_is_rejected() {
    let (client, fetcher, clock) = setup(25);
    let tags = ["2PP", "2PY", "2PL", "2PQ", "2PG", "2PR"];

    for tag in &tags[..5] {
        client.players().get_profile(tag, &RequestOptions::none()).await.unwrap();
    }

    let err = client
        .players()
        .get_profile(tags[5], &RequestOptions::none())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::RateLimit(RateLimitError::Exceeded {
            limit: 5,
            window_ms: 1000
        })
    );
    assert!(err.is_retryable());
    assert_eq!(fetcher.calls(), 5);

    // Cached reads do not consume rate slots
    client.players().get_profile("2PP", &RequestOptions::none()).await.unwrap();

    clock.advance(Duration::from_millis(1000));
    client.players().get_profile(tags[5], &RequestOptions::none()).await.unwrap();
    assert_eq!(fetcher.calls(), 6);
}

#[tokio::test]
async fn test_transport_failure_is_not_cached() {
    let (client, fetcher, _clock) = setup(25);

    fetcher.set_failing(true);
    let err = client.players().get_battles("2PP", &RequestOptions::none()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));

    fetcher.set_failing(false);
    let battles = client.players().get_battles("2PP", &RequestOptions::none()).await.unwrap();
    assert_eq!(battles.len(), 1);
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_zero_capacity_always_refetches() {
    let (client, fetcher, _clock) = setup(0);

    client.clans().get_data("2CCCP", &RequestOptions::none()).await.unwrap();
    client.clans().get_data("2CCCP", &RequestOptions::none()).await.unwrap();

    assert_eq!(fetcher.calls(), 2);
    assert!(client.cache_stats().iter().all(|s| s.total_entries == 0));
}

#[tokio::test]
async fn test_capacity_evicts_oldest_clan() {
    let (client, fetcher, _clock) = setup(2);

    for tag in ["2CCCP", "2YYYP", "2QQQP"] {
        client.clans().get_data(tag, &RequestOptions::none()).await.unwrap();
    }
    assert_eq!(fetcher.calls(), 3);

    // Newest two stay resident
    client.clans().get_data("2YYYP", &RequestOptions::none()).await.unwrap();
    client.clans().get_data("2QQQP", &RequestOptions::none()).await.unwrap();
    assert_eq!(fetcher.calls(), 3);

    client.clans().get_data("2CCCP", &RequestOptions::none()).await.unwrap();
    assert_eq!(fetcher.calls(), 4);
}

#[tokio::test]
async fn test_collections_are_never_cached() {
    let (client, fetcher, _clock) = setup(25);

    client.players().get_top(None, &RequestOptions::none()).await.unwrap();
    client.players().get_top(None, &RequestOptions::none()).await.unwrap();
    let popular = client.clans().get_popular(&RequestOptions::none()).await.unwrap();

    assert_eq!(popular.len(), 1);
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(
        *fetcher.endpoints.lock(),
        vec!["top/players", "top/players", "popular/clans"]
    );
}

#[tokio::test]
async fn test_clients_do_not_share_state() {
    let (first, first_fetcher, _) = setup(25);
    let (second, second_fetcher, _) = setup(25);

    for tag in ["2PP", "2PY", "2PL", "2PQ", "2PG"] {
        first.players().get_profile(tag, &RequestOptions::none()).await.unwrap();
    }
    assert!(first.players().get_profile("2PR", &RequestOptions::none()).await.is_err());

    second.players().get_profile("2PP", &RequestOptions::none()).await.unwrap();
    assert_eq!(first_fetcher.calls(), 5);
    assert_eq!(second_fetcher.calls(), 1);
}

#[tokio::test]
async fn test_concurrent_misses_both_fetch_and_last_store_wins() {
    let (client, fetcher, _clock) = setup(25);
    let none = RequestOptions::none();

    let (first, second) = tokio::join!(
        client.clans().get_data("2CCCP", &none),
        client.clans().get_data("2CCCP", &none)
    );
    let (first, second) = (first.unwrap(), second.unwrap());
    assert!(!Arc::ptr_eq(&first, &second));

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(client.rate_limiter().in_window(), 2);

    let clan_data = client
        .cache_stats()
        .into_iter()
        .find(|s| s.name == "clan_data")
        .unwrap();
    assert_eq!(clan_data.total_entries, 1);

    let cached = client.clans().get_data("2CCCP", &none).await.unwrap();
    assert!(Arc::ptr_eq(&cached, &first) || Arc::ptr_eq(&cached, &second));
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_huge_ttl_does_not_overflow() {
    let config = ClientConfig {
        cache_ttl_secs: u64::MAX,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let (client, fetcher, _clock) = setup_with(config);
    client.players().get_profile("2PP", &RequestOptions::none()).await.unwrap();
    client.players().get_profile("2PP", &RequestOptions::none()).await.unwrap();
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_huge_rate_limit_does_not_overflow() {
    let config = ClientConfig {
        rate_limit: usize::MAX,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let (client, fetcher, _clock) = setup_with(config);
    for tag in ["2PP", "2PY", "2PL", "2PQ", "2PG", "2PR"] {
        client.players().get_profile(tag, &RequestOptions::none()).await.unwrap();
    }
    assert_eq!(fetcher.calls(), 6);
}

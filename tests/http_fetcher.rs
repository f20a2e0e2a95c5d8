use royale_client::errors::{ClientError, DataError, NetworkError};
use royale_client::{ClientConfig, RequestOptions, RoyaleClient};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RoyaleClient {
    let config = ClientConfig {
        base_url: server.uri(),
        token: Some("test-token".to_string()),
        ..Default::default()
    };
    RoyaleClient::new(config).unwrap()
}

#[tokio::test]
async fn test_profile_sends_auth_and_caches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/player/2PP"))
        .and(header("auth", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag": "2PP",
            "name": "Kairos",
            "trophies": 5400
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.players().get_profile("#2pp", &RequestOptions::none()).await.unwrap();
    let second = client.players().get_profile("2PP", &RequestOptions::none()).await.unwrap();

    assert_eq!(first.trophies, Some(5400));
    assert_eq!(first, second);

    let stats = client.api_stats().unwrap();
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.successful_requests, 1);
}

#[tokio::test]
async fn test_keys_become_query_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clan/2CCCP"))
        .and(query_param("keys", "name,score"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "Alpha", "score": 41000})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let clan = client
        .clans()
        .get_data("2CCCP", &RequestOptions::keys(["name", "score"]))
        .await
        .unwrap();

    assert_eq!(clan.score, Some(41000));
    assert!(clan.members.is_empty());
}

#[tokio::test]
async fn test_rate_limit_headers_are_captured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tournaments/open"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header("x-ratelimit-remaining", "3")
                .insert_header("x-ratelimit-reset", "1700000000"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.rate_limits().remaining, None);

    client.tournaments().get_open_list(&RequestOptions::none()).await.unwrap();

    let limits = client.rate_limits();
    assert_eq!(limits.remaining, Some(3));
    assert_eq!(limits.reset_at, Some(1_700_000_000));
}

#[tokio::test]
async fn test_http_error_is_surfaced_and_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clan/2CCCP/war"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"error\":true}"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for _ in 0..2 {
        let err = client.clans().get_war("2CCCP", &RequestOptions::none()).await.unwrap_err();
        match err {
            ClientError::Network(NetworkError::HttpStatusError { status, endpoint, body }) => {
                assert_eq!(status, 404);
                assert_eq!(endpoint, "clan/2CCCP/war");
                assert!(body.is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    let stats = client.api_stats().unwrap();
    assert_eq!(stats.failed_requests, 2);
    assert!(stats.last_error.is_some());
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/popular/decks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_popular_decks(&RequestOptions::none()).await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_invalid_json_is_data_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/player/2PP/chests"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.players().get_chests("2PP", &RequestOptions::none()).await.unwrap_err();
    assert!(matches!(err, ClientError::Data(DataError::ParseError { .. })));
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/endpoints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["/player/:tag"])))
        .mount(&server)
        .await;

    let config = ClientConfig {
        base_url: format!("{}/v1", server.uri()),
        token: Some("test-token".to_string()),
        ..Default::default()
    };
    let client = RoyaleClient::new(config).unwrap();

    assert_eq!(client.get_endpoints().await.unwrap(), vec!["/player/:tag".to_string()]);
}

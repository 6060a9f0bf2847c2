use httpmock::Method::GET;
use rawg_rs::{GamesBuilder, GamesQuery, RawgClient, RawgError};
use std::time::Duration;
use url::Url;

use crate::common::{builder_for, client_for, fast_retry, fixture, setup_server};

#[tokio::test]
async fn throttling_is_retried_until_attempts_run_out() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games");
        then.status(429).body("Too Many Requests");
    });

    let client = builder_for(&server).retry_config(fast_retry(3)).build().unwrap();
    let result = client.games(&GamesQuery::new()).await;

    // max_attempts counts the first attempt too
    mock.assert_hits(3);
    match result {
        Err(RawgError::RateLimited { url }) => assert!(url.ends_with("/api/games")),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_are_not_retried_by_default() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games");
        then.status(500);
    });

    let client = client_for(&server);
    let result = client.games(&GamesQuery::new()).await;

    mock.assert_hits(1);
    assert!(matches!(result, Err(RawgError::Status { status: 500, .. })));
}

#[tokio::test]
async fn per_call_retry_override_wins() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games");
        then.status(503);
    });

    let client = client_for(&server);
    let mut cfg = fast_retry(4);
    cfg.retry_on_status.push(503);

    let result = GamesBuilder::new(&client).retry_policy(Some(cfg)).fetch().await;

    mock.assert_hits(4);
    assert!(matches!(result, Err(RawgError::Status { status: 503, .. })));
}

#[tokio::test]
async fn disabled_retries_make_one_attempt() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games");
        then.status(429);
    });

    let client = builder_for(&server).retry_enabled(false).build().unwrap();
    let result = client.games(&GamesQuery::new()).await;

    mock.assert_hits(1);
    assert!(matches!(result, Err(RawgError::RateLimited { .. })));
}

#[tokio::test]
async fn connection_failures_surface_after_retries() {
    // nothing listens on port 9
    let client = RawgClient::builder()
        .api_key("k")
        .base_url(Url::parse("http://127.0.0.1:9/api/").unwrap())
        .min_request_interval(Duration::ZERO)
        .retry_config(fast_retry(2))
        .build()
        .unwrap();

    let err = client.games(&GamesQuery::new()).await.unwrap_err();
    assert!(err.is_transient(), "unexpected error {err:?}");
}

#[tokio::test]
async fn timeouts_are_typed() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/games");
        then.status(200)
            .delay(Duration::from_millis(500))
            .body(fixture("games_list"));
    });

    let client = builder_for(&server)
        .timeout(Duration::from_millis(50))
        .retry_config(fast_retry(1))
        .build()
        .unwrap();

    let result = client.games(&GamesQuery::new()).await;
    assert!(matches!(result, Err(RawgError::Timeout { .. })), "got {result:?}");
}

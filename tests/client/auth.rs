use httpmock::Method::GET;
use rawg_rs::{GamesQuery, RawgClient, RawgError};

use crate::common::{TEST_KEY, client_for, fixture, setup_server};

#[tokio::test]
async fn every_request_carries_the_api_key() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games").query_param("key", TEST_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = client_for(&server);
    let v = client.games(&GamesQuery::new()).await.unwrap();

    mock.assert_hits(1);
    assert_eq!(v["count"], 2);
}

#[tokio::test]
async fn error_urls_never_leak_the_key() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games/3498");
        then.status(500).body("boom");
    });

    let client = client_for(&server);
    let err = client.game_details(3498).await.unwrap_err();

    mock.assert_hits(1);
    match err {
        RawgError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.contains("/api/games/3498"));
            assert!(!url.contains(TEST_KEY), "key leaked into {url}");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    assert!(!format!("{client:?}").contains(TEST_KEY));
}

#[test]
fn missing_or_blank_key_is_a_config_error() {
    assert!(matches!(RawgClient::builder().build(), Err(RawgError::Config(_))));
    assert!(matches!(
        RawgClient::builder().api_key("   ").build(),
        Err(RawgError::Config(_))
    ));
}

use httpmock::Method::GET;
use serde_json::json;
use std::time::Duration;

use crate::common::{cached_client_for, setup_server};

#[tokio::test]
async fn missing_game_is_empty_not_an_error() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games/no-such-game");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"detail": "Not found."}"#);
    });

    let client = cached_client_for(&server, Duration::from_secs(60));

    let raw = client.game_details("no-such-game").await.unwrap();
    assert_eq!(raw, json!({}));

    let typed = client.game_detail("no-such-game").await.unwrap();
    assert_eq!(typed, None);

    // the not-found classification is cached like any other success
    mock.assert_hits(1);
}

#[tokio::test]
async fn missing_sub_resources_are_empty_lists() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games/999999/achievements");
        then.status(404);
    });

    let client = cached_client_for(&server, Duration::from_secs(60));
    let got = client.achievements(999_999).await.unwrap();

    mock.assert_hits(1);
    assert!(got.is_empty());
}

#[tokio::test]
async fn invalid_ids_are_rejected_before_any_request() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("{}");
    });

    let client = cached_client_for(&server, Duration::from_secs(60));
    assert!(client.game_details("").await.is_err());
    assert!(client.game_details("a/b").await.is_err());
    assert!(client.game_details("..").await.is_err());

    mock.assert_hits(0);
}

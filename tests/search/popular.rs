use chrono::{TimeZone, Utc};
use httpmock::Method::GET;
use rawg_rs::search::{self, TimePeriod};
use rawg_rs::GamesQuery;

use crate::common::{client_for, fixture, setup_server};

#[tokio::test]
async fn popular_uses_the_period_window_and_rating_order() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/games")
            .query_param("dates", "2024-03-08,2024-03-15")
            .query_param("ordering", "-rating");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = client_for(&server);
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
    let page = search::popular_games_at(&client, TimePeriod::Week, now, GamesQuery::new())
        .await
        .unwrap();

    mock.assert();
    assert_eq!(page.results.len(), 2);
}

#[tokio::test]
async fn trending_defaults_to_twenty_recently_added() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/games")
            .query_param("ordering", "-added")
            .query_param("page_size", "20");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = client_for(&server);
    search::trending_games(&client, GamesQuery::new()).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn trending_honors_explicit_page_size() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/games")
            .query_param("ordering", "-added")
            .query_param("page_size", "5");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = client_for(&server);
    search::trending_games(&client, GamesQuery::new().page_size(5))
        .await
        .unwrap();
    mock.assert();
}

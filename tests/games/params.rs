use chrono::NaiveDate;
use httpmock::Method::GET;
use rawg_rs::{DateRange, GamesQuery, RawgError};

use crate::common::{builder_for, client_for, fixture, setup_server};

#[tokio::test]
async fn filters_render_as_query_params() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/games")
            .query_param("search", "zelda")
            .query_param("search_precise", "true")
            .query_param("platforms", "4,187")
            .query_param("developers", "nintendo")
            .query_param("dates", "2017-01-01,2017-12-31")
            .query_param("metacritic", "80,100")
            .query_param("page", "2")
            .query_param("page_size", "10");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = client_for(&server);
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2017, 12, 31).unwrap(),
    )
    .unwrap();
    let q = GamesQuery::new()
        .search("zelda")
        .search_precise(true)
        .platforms([4, 187])
        .developers(["nintendo"])
        .dates(range)
        .metacritic(80, 100)
        .page(2)
        .page_size(10);

    client.games(&q).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn page_size_is_clamped_to_the_configured_maximum() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games").query_param("page_size", "25");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = builder_for(&server).max_page_size(25).build().unwrap();
    client.games(&GamesQuery::new().page_size(500)).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn zero_page_is_rejected_locally() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games");
        then.status(200).body("{}");
    });

    let client = client_for(&server);
    let err = client.games(&GamesQuery::new().page(0)).await.unwrap_err();

    mock.assert_hits(0);
    assert!(matches!(err, RawgError::InvalidParams(_)));
}

#[test]
fn inverted_date_range_is_rejected() {
    let err = DateRange::new(
        NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, RawgError::InvalidDates));
}

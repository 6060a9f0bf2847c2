use httpmock::Method::GET;
use rawg_rs::search::{self, SearchBuilder};
use rawg_rs::{GamesQuery, Ordering};

use crate::common::{client_for, fixture, setup_server};

#[tokio::test]
async fn best_match_prefers_the_closest_name() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/games")
            .query_param("search", "Halo 5")
            .query_param("page_size", "10");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("search_halo"));
    });

    let client = client_for(&server);
    let best = search::search_best_match(&client, "Halo 5").await.unwrap().unwrap();

    mock.assert();
    assert_eq!(best.name, "Halo 5: Guardians");
    assert_eq!(best.id, 3070);
}

#[tokio::test]
async fn best_match_is_none_for_empty_results() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/games");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"count": 0, "next": null, "previous": null, "results": []}"#);
    });

    let client = client_for(&server);
    let best = search::search_best_match(&client, "qwertyuiop").await.unwrap();
    assert_eq!(best, None);
}

#[tokio::test]
async fn text_search_keeps_extra_filters() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/games")
            .query_param("search", "witcher")
            .query_param("ordering", "-released")
            .query_param("page", "3");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = client_for(&server);
    let page = search::search_games(
        &client,
        "witcher",
        GamesQuery::new().ordering(Ordering::ReleasedDesc).page(3),
    )
    .await
    .unwrap();

    mock.assert();
    assert_eq!(page.results.len(), 2);
}

#[tokio::test]
async fn search_text_overrides_query_search() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games").query_param("search", "portal");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = client_for(&server);
    SearchBuilder::new(&client, "portal")
        .query(GamesQuery::new().search("ignored"))
        .fetch()
        .await
        .unwrap();

    mock.assert();
}

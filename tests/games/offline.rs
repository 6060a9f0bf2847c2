use chrono::NaiveDate;
use httpmock::Method::GET;
use rawg_rs::{Game, GamesBuilder, GamesQuery, ListQuery, Ordering};

use crate::common::{client_for, fixture, setup_server};

#[tokio::test]
async fn games_list_decodes_into_summaries() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/games")
            .query_param("genres", "action,rpg")
            .query_param("ordering", "-rating");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("games_list"));
    });

    let client = client_for(&server);
    let page = GamesBuilder::new(&client)
        .query(|q| q.genres(["action", "rpg"]).ordering(Ordering::RatingDesc))
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(page.count, Some(2));
    assert!(page.has_next());
    assert_eq!(page.results.len(), 2);

    let gta = &page.results[0];
    assert_eq!(gta.id, 3498);
    assert_eq!(gta.slug, "grand-theft-auto-v");
    assert_eq!(gta.released, NaiveDate::from_ymd_opt(2013, 9, 17));
    assert_eq!(gta.genres, vec!["Action", "Adventure"]);
    assert_eq!(gta.platforms, vec!["PC", "PlayStation 5"]);
    assert_eq!(page.results[1].name, "The Witcher 3: Wild Hunt");
}

#[tokio::test]
async fn game_detail_flattens_credits() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games/portal-2");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("game_detail"));
    });

    let client = client_for(&server);
    let detail = Game::new(&client, "portal-2").details().await.unwrap().unwrap();

    mock.assert();
    assert_eq!(detail.summary.name, "Portal 2");
    assert_eq!(detail.description.as_deref(), Some("Portal 2 is a first-person puzzle game."));
    assert_eq!(detail.developers, vec!["Valve Software"]);
    assert_eq!(detail.publishers, vec!["Valve"]);
    assert_eq!(detail.content_rating.as_deref(), Some("Everyone 10+"));
    assert_eq!(detail.website.as_deref(), Some("http://www.thinkwithportals.com/"));
}

#[tokio::test]
async fn achievements_tolerate_non_numeric_percent() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/games/4200/achievements")
            .query_param("page_size", "40");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("game_achievements"));
    });

    let client = client_for(&server);
    let got = client.achievements(4200).await.unwrap();

    mock.assert();
    assert_eq!(got.len(), 3);
    assert_eq!(got[0].percent, Some(81.45));
    assert_eq!(got[1].name, "Secret Achievement");
    assert_eq!(got[1].percent, None);
    assert_eq!(got[1].image, None);
    assert_eq!(got[2].percent, Some(12.5));
    assert!(got.iter().all(|a| a.game_id == "4200"));
}

#[tokio::test]
async fn screenshots_carry_owner_and_size() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/games/4200/screenshots");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("game_screenshots"));
    });

    let client = client_for(&server);
    let shots = client.screenshots(4200).await.unwrap();

    mock.assert();
    assert_eq!(shots.len(), 2);
    assert_eq!(shots[0].image, "https://media.rawg.io/s1.jpg");
    assert_eq!(shots[0].width, Some(1920));
    assert_eq!(shots[1].game_id, "4200");
}

#[tokio::test]
async fn raw_sub_resources_hit_their_paths() {
    let server = setup_server();
    let paths = [
        "/api/games/4200/movies",
        "/api/games/4200/stores",
        "/api/games/4200/game-series",
        "/api/games/4200/additions",
        "/api/games/4200/parent-games",
        "/api/games/4200/development-team",
    ];
    let mocks: Vec<_> = paths
        .iter()
        .map(|p| {
            server.mock(|when, then| {
                when.method(GET).path(*p);
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"count": 0, "results": []}"#);
            })
        })
        .collect();

    let client = client_for(&server);
    let q = ListQuery::new();
    client.game_movies(4200).await.unwrap();
    client.game_stores(4200, &q).await.unwrap();
    client.game_series(4200, &q).await.unwrap();
    client.game_additions(4200, &q).await.unwrap();
    client.game_parent_games(4200, &q).await.unwrap();
    client.game_development_team(4200, &q).await.unwrap();

    for m in &mocks {
        m.assert_hits(1);
    }
}

#[tokio::test]
async fn malformed_body_degrades_to_empty_page() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/games");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html>maintenance</html>");
    });

    let client = client_for(&server);
    let page = client.game_summaries(&GamesQuery::new()).await.unwrap();
    assert!(page.results.is_empty());
    assert_eq!(page.count, None);
}

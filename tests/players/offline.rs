use httpmock::Method::GET;
use httpmock::MockServer;
use rawg_rs::{AppDetails, PlayerCountService, PlayerStats, PriceFilter, SteamPlayerCounts};

use crate::common::{fixture, setup_server};

fn steam_for(server: &MockServer) -> SteamPlayerCounts {
    SteamPlayerCounts::new()
        .unwrap()
        .base_url(&server.base_url())
        .unwrap()
        .store_base_url(&format!("{}/api", server.base_url()))
        .unwrap()
}

/// Chart, current-players and store mocks for apps 730 (free), 570 (no store record) and
/// 271590 (paid).
fn mock_chart_and_store(server: &MockServer) -> [httpmock::Mock<'_>; 3] {
    server.mock(|when, then| {
        when.method(GET).path("/ISteamChartsService/GetMostPlayedGames/v1/");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("steam_most_played"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/ISteamUserStats/GetNumberOfCurrentPlayers/v1/");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("steam_current_players"));
    });
    let free = server.mock(|when, then| {
        when.method(GET).path("/api/appdetails").query_param("appids", "730");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("steam_app_details_free"));
    });
    let missing = server.mock(|when, then| {
        when.method(GET).path("/api/appdetails").query_param("appids", "570");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"570": {"success": false}}"#);
    });
    let paid = server.mock(|when, then| {
        when.method(GET)
            .path("/api/appdetails")
            .query_param("appids", "271590")
            .query_param("cc", "us");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("steam_app_details_paid"));
    });
    [free, missing, paid]
}

#[tokio::test]
async fn current_and_peak_players_are_read() {
    let server = setup_server();
    let current = server.mock(|when, then| {
        when.method(GET)
            .path("/ISteamUserStats/GetNumberOfCurrentPlayers/v1/")
            .query_param("appid", "730");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("steam_current_players"));
    });
    let chart = server.mock(|when, then| {
        when.method(GET).path("/ISteamChartsService/GetMostPlayedGames/v1/");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("steam_most_played"));
    });

    let steam = steam_for(&server);
    let stats = steam.player_stats(730).await;

    current.assert();
    chart.assert();
    assert_eq!(
        stats,
        PlayerStats {
            app_id: 730,
            current: Some(843_210),
            peak: Some(1_502_341),
        }
    );
}

#[tokio::test]
async fn apps_outside_the_chart_have_unknown_peak() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/ISteamChartsService/GetMostPlayedGames/v1/");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("steam_most_played"));
    });

    let steam = steam_for(&server);
    assert_eq!(steam.peak_players(400).await, None);
}

#[tokio::test]
async fn failures_degrade_to_unknown() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/ISteamUserStats/GetNumberOfCurrentPlayers/v1/");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/ISteamChartsService/GetMostPlayedGames/v1/");
        then.status(200).body("not json");
    });

    let steam = steam_for(&server);
    let stats = steam.player_stats(570).await;
    assert_eq!(stats.current, None);
    assert_eq!(stats.peak, None);
}

#[tokio::test]
async fn api_key_is_forwarded_when_set() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ISteamUserStats/GetNumberOfCurrentPlayers/v1/")
            .query_param("appid", "570")
            .query_param("key", "steam-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("steam_current_players"));
    });

    let steam = steam_for(&server).api_key("steam-key");
    assert_eq!(steam.current_players(570).await, Some(843_210));
    mock.assert();
}

#[tokio::test]
async fn app_details_read_price_and_name() {
    let server = setup_server();
    mock_chart_and_store(&server);
    let steam = steam_for(&server);

    let paid = steam.app_details(271590).await.unwrap();
    assert_eq!(paid.name.as_deref(), Some("Grand Theft Auto V Legacy"));
    assert!(!paid.is_free);
    assert_eq!(paid.price, Some(29.98));
    assert_eq!(paid.kind.as_deref(), Some("game"));

    let free: AppDetails = steam.app_details(730).await.unwrap();
    assert!(free.is_free);
    assert_eq!(free.price, Some(0.0));

    assert_eq!(steam.app_details(570).await, None);
    assert_eq!(steam.game_name(570).await, "Unknown Game");
    assert_eq!(steam.game_name(730).await, "Counter-Strike 2");
}

#[tokio::test]
async fn store_failures_degrade_to_unknown_game() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/appdetails");
        then.status(503);
    });
    let steam = steam_for(&server);
    assert_eq!(steam.app_details(10).await, None);
    assert_eq!(steam.game_name(10).await, "Unknown Game");
}

#[tokio::test]
async fn top_free_games_keep_only_free_apps() {
    let server = setup_server();
    mock_chart_and_store(&server);
    let steam = steam_for(&server);

    let games = steam.top_free_games(5).await;
    assert_eq!(games.len(), 1);
    let cs = &games[0];
    assert_eq!((cs.rank, cs.app_id), (1, 730));
    assert_eq!(cs.name, "Counter-Strike 2");
    assert_eq!(cs.current_players, Some(843_210));
    assert_eq!(cs.peak_players, Some(1_502_341));
    assert_eq!(cs.price, Some(0.0));
}

#[tokio::test]
async fn paid_listing_stops_at_limit_in_chart_order() {
    let server = setup_server();
    let [free, missing, paid] = mock_chart_and_store(&server);
    let steam = steam_for(&server);

    let games = steam.most_played_games(2, PriceFilter::PaidOnly).await;
    let ids: Vec<_> = games.iter().map(|g| g.app_id).collect();
    assert_eq!(ids, vec![570, 271590]);
    assert_eq!(games[0].name, "Unknown Game");
    assert_eq!(games[0].price, None);
    assert_eq!(games[1].price, Some(29.98));
    assert_eq!(games[1].peak_players, Some(118_204));
    free.assert_hits(1);
    missing.assert_hits(1);
    paid.assert_hits(1);

    let first = steam.top_paid_games(1).await;
    assert_eq!(first.len(), 1);
    paid.assert_hits(1);
}

#[tokio::test]
async fn unreachable_chart_yields_empty_listing() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/ISteamChartsService/GetMostPlayedGames/v1/");
        then.status(500);
    });
    let steam = steam_for(&server);
    assert!(steam.most_played_games(10, PriceFilter::Any).await.is_empty());
    assert!(steam.most_played_games(0, PriceFilter::Any).await.is_empty());
}

use httpmock::Method::GET;
use rawg_rs::ListQuery;
use std::time::{Duration, Instant};

use crate::common::{builder_for, fixture, setup_server};

#[tokio::test]
async fn requests_are_spaced_by_the_minimum_interval() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/genres");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("genres"));
    });

    let interval = Duration::from_millis(120);
    let client = builder_for(&server)
        .min_request_interval(interval)
        .build()
        .unwrap();

    let started = Instant::now();
    for _ in 0..3 {
        client.genres(&ListQuery::new()).await.unwrap();
    }
    let elapsed = started.elapsed();

    mock.assert_hits(3);
    // the first request goes out immediately, the next two wait
    assert!(elapsed >= interval * 2, "elapsed {elapsed:?}");
}

#[tokio::test]
async fn clones_share_one_limiter() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/genres");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("genres"));
    });

    let interval = Duration::from_millis(120);
    let client = builder_for(&server)
        .min_request_interval(interval)
        .build()
        .unwrap();
    let other = client.clone();

    let started = Instant::now();
    let q = ListQuery::new();
    let (a, b) = tokio::join!(client.genres(&q), other.genres(&q));
    a.unwrap();
    b.unwrap();

    mock.assert_hits(2);
    assert!(started.elapsed() >= interval, "elapsed {:?}", started.elapsed());
}

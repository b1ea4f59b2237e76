use crate::common;
use axum::http::StatusCode;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn weather_round_trip_serves_the_cached_snapshot() {
    let (upstream, hits) = common::spawn_stub_upstream(StatusCode::OK).await;
    let base = common::spawn_server(common::test_settings(&upstream)).await;

    let resp = reqwest::get(format!("{base}/api/weather")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    let first: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(first["name"], "Vancouver");
    assert_eq!(first["main"]["temp"], 285.15);
    assert_eq!(first["weather"][0]["description"], "light rain");

    // Second request within the TTL: same payload, no second upstream hit.
    let second: serde_json::Value = reqwest::get(format!("{base}/api/weather"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second, first);
    assert_eq!(hits.weather.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn upstream_failure_surfaces_as_500_with_the_error_text() {
    let (upstream, hits) = common::spawn_stub_upstream(StatusCode::BAD_GATEWAY).await;
    let base = common::spawn_server(common::test_settings(&upstream)).await;

    let resp = reqwest::get(format!("{base}/api/weather")).await.unwrap();
    assert_eq!(resp.status(), 500);
    let body = resp.text().await.unwrap();
    assert!(
        body.contains("unexpected status code"),
        "body should carry the upstream error, got: {body}"
    );

    // The failure was not cached: the next request tries upstream again.
    let _ = reqwest::get(format!("{base}/api/weather")).await.unwrap();
    assert_eq!(hits.weather.load(Ordering::SeqCst), 2);
}

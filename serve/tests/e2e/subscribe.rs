use crate::common;
use axum::http::StatusCode;
use futures_util::StreamExt;
use std::time::Duration;

#[tokio::test]
async fn subscribe_streams_a_refresher_published_weather_event() {
    let (upstream, _hits) = common::spawn_stub_upstream(StatusCode::OK).await;
    let mut settings = common::test_settings(&upstream);
    settings.weather.ttl = Duration::from_millis(100);
    settings.refresh = true;
    let base = common::spawn_server(settings).await;

    let resp = reqwest::get(format!("{base}/subscribe")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");

    let mut stream = resp.bytes_stream();
    let mut buf = String::new();
    let received = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(chunk) = stream.next().await {
            buf.push_str(&String::from_utf8_lossy(&chunk.unwrap()));
            if buf.contains("\"type\":\"weather\"") {
                return;
            }
        }
        panic!("stream ended before a weather event arrived");
    })
    .await;

    assert!(received.is_ok(), "no weather event within 5s, got: {buf}");
    assert!(buf.contains("data:"), "payloads arrive as SSE data lines: {buf}");
    assert!(buf.contains("\"snapshot\""));
}

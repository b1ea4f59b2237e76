use crate::common;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn calendar_get_returns_the_items_array() {
    let (upstream, hits) = common::spawn_stub_upstream(StatusCode::OK).await;
    let base = common::spawn_server(common::test_settings(&upstream)).await;

    let resp = reqwest::get(format!("{base}/api/calendar")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let events: serde_json::Value = resp.json().await.unwrap();
    assert!(events.is_array());
    assert_eq!(events[0]["summary"], "Dentist");
    assert_eq!(events[0]["start"]["dateTime"], "2026-08-07T09:30:00Z");

    // Cached on the second read.
    let _ = reqwest::get(format!("{base}/api/calendar")).await.unwrap();
    assert_eq!(hits.events.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn calendar_post_inserts_an_all_day_event_and_echoes_it() {
    let (upstream, _hits) = common::spawn_stub_upstream(StatusCode::OK).await;
    let base = common::spawn_server(common::test_settings(&upstream)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/calendar"))
        .json(&json!({"summary": "Dinner", "date": "2026-08-09T18:00:00Z"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let saved: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(saved["id"], "created-1");
    assert_eq!(saved["summary"], "Dinner");
    assert_eq!(saved["start"]["date"], "2026-08-09");
    assert_eq!(saved["end"]["date"], "2026-08-09");
}

#[tokio::test]
async fn calendar_post_with_a_malformed_body_is_rejected() {
    let (upstream, _hits) = common::spawn_stub_upstream(StatusCode::OK).await;
    let base = common::spawn_server(common::test_settings(&upstream)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/calendar"))
        .json(&json!({"summary": "Dinner", "date": "next tuesday"}))
        .send()
        .await
        .unwrap();
    assert!(
        resp.status().is_client_error(),
        "expected 4xx for an unparseable date, got {}",
        resp.status()
    );
}

#[tokio::test]
async fn calendar_list_returns_the_visible_calendars() {
    let (upstream, _hits) = common::spawn_stub_upstream(StatusCode::OK).await;
    let base = common::spawn_server(common::test_settings(&upstream)).await;

    let list: serde_json::Value = reqwest::get(format!("{base}/api/calendars"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["items"][0]["id"], "family@example.com");
    assert_eq!(list["items"][0]["primary"], true);
}

//! Shared e2e helpers: a stub upstream serving both providers' routes, and a
//! hearth server bound to an ephemeral port.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Requests seen per upstream route, for cache assertions.
#[derive(Default)]
pub struct StubHits {
    pub weather: AtomicUsize,
    pub events: AtomicUsize,
}

type StubState = (Arc<StubHits>, StatusCode);

/// Binds a stub upstream on an ephemeral port. `weather_status` lets a test
/// force the weather route into a failure mode; calendar routes always work.
pub async fn spawn_stub_upstream(weather_status: StatusCode) -> (String, Arc<StubHits>) {
    let hits = Arc::new(StubHits::default());
    let app = Router::new()
        .route("/data/2.5/weather", get(stub_weather))
        .route("/calendars/:id/events", get(stub_events).post(stub_insert))
        .route("/users/me/calendarList", get(stub_calendars))
        .with_state((Arc::clone(&hits), weather_status));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), hits)
}

async fn stub_weather(State((hits, status)): State<StubState>) -> axum::response::Response {
    hits.weather.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    if status != StatusCode::OK {
        return (status, "upstream exploded").into_response();
    }
    Json(json!({
        "main": {"temp": 285.15, "feels_like": 284.2, "pressure": 1012, "humidity": 87},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "wind": {"speed": 4.1, "deg": 250},
        "name": "Vancouver",
        "cod": 200
    }))
    .into_response()
}

async fn stub_events(State((hits, _)): State<StubState>) -> Json<Value> {
    hits.events.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    Json(json!({
        "summary": "Family",
        "timeZone": "America/Vancouver",
        "items": [
            {"id": "a1", "status": "confirmed", "summary": "Dentist",
             "start": {"dateTime": "2026-08-07T09:30:00Z"},
             "end": {"dateTime": "2026-08-07T10:00:00Z"}}
        ]
    }))
}

async fn stub_insert(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": "created-1",
        "status": "confirmed",
        "summary": body["summary"],
        "start": body["start"],
        "end": body["end"]
    }))
}

async fn stub_calendars() -> Json<Value> {
    Json(json!({
        "items": [{"id": "family@example.com", "summary": "Family", "primary": true}]
    }))
}

/// Settings pointed at the stub: long TTLs, refreshers off. Tests that want
/// the stream flip `refresh` on and shrink a TTL.
pub fn test_settings(upstream: &str) -> config::Settings {
    config::Settings {
        weather: config::WeatherSettings {
            api_key: "test-key".to_string(),
            city_id: "6173331".to_string(),
            base_url: upstream.to_string(),
            ttl: Duration::from_secs(300),
        },
        calendar: config::CalendarSettings {
            api_key: "test-key".to_string(),
            calendar_id: "family".to_string(),
            base_url: upstream.to_string(),
            ttl: Duration::from_secs(300),
        },
        bind_addr: "127.0.0.1:0".to_string(),
        subscribe_queue_capacity: 8,
        refresh: false,
    }
}

/// Binds the hearth server to an ephemeral port and serves in the background.
pub async fn spawn_server(settings: config::Settings) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve::run_serve_on_listener(listener, settings));
    format!("http://{}", addr)
}

//! Axum app: shared state, router, and refresher wiring.

use std::sync::Arc;

use axum::{routing::get, Router};
use display_event::DisplayEvent;
use hearth::{calendar, weather, Broker, Cache};

use crate::api::{get_calendars, get_events, get_weather, save_event};
use crate::subscribe::subscribe;

/// Shared state for the HTTP handlers.
///
/// Reads go through the caches. Event creation uses the bare calendar client:
/// a write must reach the upstream, not a cached page.
pub(crate) struct AppState {
    pub(crate) weather: Arc<Cache<weather::Client>>,
    pub(crate) calendar: Arc<Cache<calendar::Client>>,
    pub(crate) calendar_writer: calendar::Client,
    pub(crate) broker: Broker<DisplayEvent>,
}

/// Builds the app state from settings and, unless disabled, spawns one
/// background refresher per cache with the cache's own TTL as its period.
pub(crate) fn build_state(settings: &config::Settings) -> Arc<AppState> {
    let weather_client = weather::Client::new(
        &settings.weather.base_url,
        &settings.weather.city_id,
        &settings.weather.api_key,
    );
    let calendar_client = calendar::Client::new(
        &settings.calendar.base_url,
        &settings.calendar.calendar_id,
        &settings.calendar.api_key,
    );
    let weather_cache = Arc::new(Cache::new(weather_client, settings.weather.ttl));
    let calendar_cache = Arc::new(Cache::new(calendar_client.clone(), settings.calendar.ttl));
    let broker = Broker::spawn(settings.subscribe_queue_capacity);

    if settings.refresh {
        // Detached: the refreshers live as long as the process.
        let _ = hearth::refresh::spawn(
            Arc::clone(&weather_cache),
            broker.clone(),
            settings.weather.ttl,
            |snapshot| DisplayEvent::weather(snapshot),
        );
        let _ = hearth::refresh::spawn(
            Arc::clone(&calendar_cache),
            broker.clone(),
            settings.calendar.ttl,
            |page| DisplayEvent::calendar(&page.items),
        );
    }

    Arc::new(AppState {
        weather: weather_cache,
        calendar: calendar_cache,
        calendar_writer: calendar_client,
        broker,
    })
}

/// Routes: the two API resources, the calendar-list lookup, and the display
/// stream. Unknown methods on a route get 405 from axum's method router.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/weather", get(get_weather))
        .route("/api/calendar", get(get_events).post(save_event))
        .route("/api/calendars", get(get_calendars))
        .route("/subscribe", get(subscribe))
        .with_state(state)
}

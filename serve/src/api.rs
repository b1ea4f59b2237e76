//! Handlers for the JSON API: cached reads, one uncached write.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use hearth::calendar::{CalendarList, Event, NewEvent};
use hearth::weather::Weather;

use crate::app::AppState;
use crate::response::{ApiError, ApiJson};

/// `GET /api/weather`: the cached current-conditions snapshot.
pub(crate) async fn get_weather(
    State(state): State<Arc<AppState>>,
) -> Result<ApiJson<Weather>, ApiError> {
    let snapshot = state.weather.get().await?;
    Ok(ApiJson(snapshot.as_ref().clone()))
}

/// `GET /api/calendar`: the cached upcoming events. The display consumes the
/// items array, not the page wrapper.
pub(crate) async fn get_events(
    State(state): State<Arc<AppState>>,
) -> Result<ApiJson<Vec<Event>>, ApiError> {
    let page = state.calendar.get().await?;
    Ok(ApiJson(page.items.clone()))
}

/// `POST /api/calendar`: insert an all-day event upstream and echo the saved
/// event. Writes bypass the read cache; the cached page catches up on its own
/// TTL. A malformed body is rejected by the `Json` extractor before this runs.
pub(crate) async fn save_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<NewEvent>,
) -> Result<ApiJson<Event>, ApiError> {
    let saved = state.calendar_writer.insert(&event).await?;
    Ok(ApiJson(saved))
}

/// `GET /api/calendars`: calendars visible to the configured key.
pub(crate) async fn get_calendars(
    State(state): State<Arc<AppState>>,
) -> Result<ApiJson<CalendarList>, ApiError> {
    let list = state.calendar_writer.calendars().await?;
    Ok(ApiJson(list))
}

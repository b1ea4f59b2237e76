//! The display stream: `GET /subscribe` as server-sent events.

use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use tokio_stream::StreamExt;

use crate::app::AppState;
use crate::response::with_cors;

/// `GET /subscribe`: registers with the broker and relays every delivered
/// value as one JSON-encoded SSE message until the peer disconnects.
///
/// Disconnect ends the stream, which drops the subscription; dropping it
/// deregisters from the broker and closes the delivery channel.
pub(crate) async fn subscribe(State(state): State<Arc<AppState>>) -> Response {
    let subscription = state.broker.subscribe().await;
    tracing::debug!(subscriber = %subscription.id(), "display connected");

    let stream = subscription.map(|value| Event::default().json_data(&value));
    with_cors(
        Sse::new(stream)
            .keep_alive(KeepAlive::default())
            .into_response(),
    )
}

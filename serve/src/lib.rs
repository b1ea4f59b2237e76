//! HTTP server for the hearth display backend (axum + SSE).
//!
//! Routes: `GET /api/weather`, `GET|POST /api/calendar`, `GET /api/calendars`,
//! and `GET /subscribe` (text/event-stream).
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`].

mod api;
mod app;
mod response;
mod subscribe;

use tokio::net::TcpListener;
use tracing::info;

use app::{build_state, router};

/// Runs the server on an existing listener. Used by tests (bind to
/// `127.0.0.1:0` first, then pass the listener in).
pub async fn run_serve_on_listener(
    listener: TcpListener,
    settings: config::Settings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    let state = build_state(&settings);
    info!("hearth listening on http://{}", addr);

    let app = router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Binds `settings.bind_addr` and serves until the process exits.
pub async fn run_serve(
    settings: config::Settings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    run_serve_on_listener(listener, settings).await
}

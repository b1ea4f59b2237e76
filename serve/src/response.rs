//! Response helpers: JSON with the display's CORS header, and error mapping.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use hearth::FetchError;

/// The display frontend is served from elsewhere, so every response carries
/// the permissive CORS header.
pub(crate) fn with_cors(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// 200 with a JSON body.
pub(crate) struct ApiJson<T>(pub(crate) T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        with_cors(Json(self.0).into_response())
    }
}

/// An upstream failure surfaced to the caller: 500 with the error text as the
/// body. The cause chain goes to the log, not the wire.
pub(crate) struct ApiError(pub(crate) FetchError);

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("upstream fetch failed: {}", self.0);
        with_cors((StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response())
    }
}

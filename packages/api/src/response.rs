// ABOUTME: Response helpers shared by the proxy handlers
// ABOUTME: Relays upstream JSON verbatim and collapses failures into a 500 error body

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::upstream::UpstreamBody;

/// Error body returned to the browser: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyError {
    pub error: String,
}

impl ProxyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for ProxyError {
    // The upstream status is never passed through
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

/// 200 with the upstream body exactly as received
pub fn relay(body: UpstreamBody) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from(body.raw),
    )
        .into_response()
}

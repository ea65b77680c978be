//! Request/response logging with timing, correlated by request ID.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{Instrument, Level, info, span, warn};

use super::RequestId;

pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );

    async move {
        info!(method = %method, path = %uri.path(), "Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        if status.is_server_error() {
            warn!(status = status.as_u16(), duration_ms, "Response sent");
        } else {
            info!(status = status.as_u16(), duration_ms, "Response sent");
        }

        response
    }
    .instrument(span)
    .await
}

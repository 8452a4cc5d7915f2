//! HTTP request/response tracing middleware.

use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, MakeSpan, OnResponse, TraceLayer};
use tracing::{Span, info_span};

/// Header a proxy may set to correlate log lines with its own.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Opens one `request` span per call.
///
/// Only the path is recorded; query strings can carry tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");

        info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %request_id,
        )
    }
}

/// Logs status and latency once the response head is ready.
///
/// 5xx responses are logged at `ERROR`, everything else at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseLog;

impl<B> OnResponse<B> for ResponseLog {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);

        if response.status().is_server_error() {
            tracing::error!(status, latency_ms, "request failed");
        } else {
            tracing::info!(status, latency_ms, "request finished");
        }
    }
}

/// Creates the tracing middleware applied to the whole router.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST path=/url/new request_id=-}: request finished status=201 latency_ms=12
/// INFO request{method=GET path=/00000a request_id=7f3a}: request finished status=301 latency_ms=3
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan, DefaultOnRequest, ResponseLog>
{
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(ResponseLog)
}

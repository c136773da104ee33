//! Request-id middleware: an `x-request-id` header (nanoid) is accepted from
//! the client or generated, recorded on the request span and echoed on the
//! response.

use axum::http::{HeaderName, Request};
use axum::{body::Body, middleware::Next, response::Response};
use std::time::Duration;
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::trace::DefaultOnRequest;
use tracing::field::Empty;

/// Request extension carrying the id for handlers.
#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

pub fn header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = nanoid::nanoid!();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Store the request id in Request.extensions and record it on the current
/// span. Runs inside the trace layer so the span is the request span.
pub async fn push_req_id_to_extensions(mut req: Request<Body>, next: Next) -> Response {
    let hdr = header();
    let rid = req
        .headers()
        .get(&hdr)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| "n/a".to_string());

    req.extensions_mut().insert(XRequestId(rid.clone()));
    tracing::Span::current().record("request_id", tracing::field::display(&rid));

    next.run(req).await
}

/// Trace layer: one `http_request` span per request carrying the request id,
/// with status and latency recorded when the response is ready.
#[allow(clippy::type_complexity)]
pub fn create_trace_layer() -> tower_http::trace::TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> tracing::Span + Clone,
    DefaultOnRequest,
    impl Fn(&axum::http::Response<Body>, Duration, &tracing::Span) + Clone,
> {
    use tower_http::trace::TraceLayer;

    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let hdr = header();
            let rid = req
                .headers()
                .get(&hdr)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                version = ?req.version(),
                request_id = %rid,
                status = Empty,
                latency_ms = Empty
            )
        })
        .on_response(
            |res: &axum::http::Response<Body>, latency: Duration, span: &tracing::Span| {
                span.record("status", res.status().as_u16());
                span.record("latency_ms", latency.as_millis() as u64);
                tracing::debug!(
                    status = res.status().as_u16(),
                    latency_ms = latency.as_millis() as u64,
                    "Request completed"
                );
            },
        )
}

//! SSE endpoint for the celebration frame stream.

use std::sync::Arc;
use std::time::Duration;

use axum::{response::IntoResponse, routing::get, Extension, Router};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::engine::CelebrationEngine;
use crate::frame::CelebrationFrame;

/// Routes owned by this module. The long timeout lets the stream outlive
/// the global request deadline.
pub fn router(engine: Arc<CelebrationEngine>) -> Router {
    Router::new()
        .route("/api/celebrations/events", get(celebration_events))
        .layer(Extension(engine))
        .layer(TimeoutLayer::new(Duration::from_secs(60 * 60)))
}

/// Stream of celebration frames (SSE)
#[utoipa::path(
    get,
    path = "/api/celebrations/events",
    tag = "celebrations",
    operation_id = "celebrations.events",
    responses(
        (status = 200, description = "SSE stream of celebration frames; each event is named `celebration` and carries a JSON frame", body = CelebrationFrame, content_type = "text/event-stream")
    )
)]
pub async fn celebration_events(
    Extension(engine): Extension<Arc<CelebrationEngine>>,
) -> impl IntoResponse {
    info!("New SSE subscriber for celebration frames");
    engine.frames().sse_response_named("celebration")
}

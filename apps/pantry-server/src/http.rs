//! HTTP composition: module routers, operational endpoints, OpenAPI document
//! and the middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::response::Html;
use axum::{middleware::from_fn, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::OpenApi;

use celebrations::CelebrationEngine;
use runtime::AppConfig;
use shopping_list::domain::Service;

use crate::request_id;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pantry API",
        description = "Shopping-list CRUD and the celebration frame stream"
    ),
    paths(
        shopping_list::api::rest::handlers::list_items,
        shopping_list::api::rest::handlers::create_item,
        shopping_list::api::rest::handlers::update_item,
        shopping_list::api::rest::handlers::delete_item,
        shopping_list::api::rest::handlers::clear_bought,
        celebrations::routes::celebration_events,
        healthz,
    ),
    components(schemas(
        shopping_list::api::rest::dto::ItemDto,
        shopping_list::api::rest::dto::CreateItemReq,
        shopping_list::api::rest::dto::UpdateItemReq,
        shopping_list::api::rest::error::ErrorResponse,
        celebrations::frame::CelebrationFrame,
        celebrations::frame::FrameParticle,
        celebrations::frame::SkinDto,
    )),
    tags(
        (name = "items", description = "Grocery item collection"),
        (name = "celebrations", description = "Server-driven celebration effects"),
        (name = "system", description = "Operational endpoints")
    )
)]
struct ApiDoc;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "system",
    operation_id = "system.healthz",
    responses((status = 200, description = "Service is up"))
)]
pub async fn healthz() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn serve_docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Pantry API Docs</title>
  <script src="https://unpkg.com/@stoplight/elements@latest/web-components.min.js"></script>
  <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@latest/styles.min.css">
</head>
<body>
  <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>"#,
    )
}

/// Assemble the full application router.
///
/// Middleware, outermost first: set request id → propagate it to responses →
/// trace span → id into extensions → timeout → CORS (when enabled) → body
/// limit. The id must be set before anything that reads it, and propagation
/// sits inside the setter so generated ids are echoed too.
pub fn build_router(
    service: Arc<Service>,
    engine: Arc<CelebrationEngine>,
    config: &AppConfig,
) -> Router {
    let mut router = Router::new()
        .merge(shopping_list::api::rest::router(service))
        .merge(celebrations::routes::router(engine))
        .merge(web_ui::router())
        .route("/healthz", get(healthz));

    if config.server.enable_docs {
        // Build the document once; serve it as static JSON.
        let openapi_value = Arc::new(ApiDoc::openapi());
        router = router
            .route(
                "/openapi.json",
                get({
                    use axum::{http::header, response::IntoResponse};
                    let v = openapi_value.clone();
                    move || async move {
                        let json = Json((*v).clone());
                        ([(header::CACHE_CONTROL, "no-store")], json).into_response()
                    }
                }),
            )
            .route("/docs", get(serve_docs));
    }

    let x_request_id = request_id::header();
    let cors = config.server.cors_enabled.then(CorsLayer::permissive);

    // CORS sits between timeout and body limit; `Router::layer` makes each
    // later layer outermost, and tower's `option_layer` erases the error type
    // to BoxError which axum rejects, so the optional layer is applied with a
    // plain conditional instead.
    let router = router.layer(RequestBodyLimitLayer::new(16 * 1024 * 1024));
    let router = if let Some(cors) = cors {
        router.layer(cors)
    } else {
        router
    };
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                request_id::MakeReqId,
            ))
            .layer(PropagateRequestIdLayer::new(x_request_id))
            .layer(request_id::create_trace_layer())
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(TimeoutLayer::new(Duration::from_secs(30))),
    )
}

use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Item-collection routes with the service injected as an extension.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/api/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        // Literal path, registered alongside the `{id}` routes below; the
        // different segment shapes never collide.
        .route("/api/items/bought/clear", delete(handlers::clear_bought))
        .route(
            "/api/items/{id}",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        .layer(Extension(service))
}

//! Embedded browser UI: the add-item page, the shopping page and their
//! static assets, compiled into the binary.

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct WebAssets;

/// Routes owned by this module.
pub fn router() -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/shop", get(shop_page))
        .route("/assets/{*file}", get(serve_asset))
}

async fn index_page() -> Response {
    serve_page("index.html")
}

async fn shop_page() -> Response {
    serve_page("shop.html")
}

fn serve_page(name: &str) -> Response {
    match WebAssets::get(name) {
        Some(content) => Html(content.data.into_owned()).into_response(),
        None => {
            tracing::error!("Embedded page missing: {}", name);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn serve_asset(Path(file): Path<String>) -> Result<impl IntoResponse, StatusCode> {
    match WebAssets::get(&file) {
        Some(content) => {
            let mime_type = content_type_for(&file);
            let body = content.data.into_owned();
            Ok(([(header::CONTENT_TYPE, mime_type)], body))
        }
        None => {
            tracing::warn!("Asset not found: {}", file);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

fn content_type_for(file: &str) -> &'static str {
    match file.rsplit('.').next().unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

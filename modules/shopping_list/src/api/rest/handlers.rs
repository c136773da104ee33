use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::dto::{CreateItemReq, ItemDto, UpdateItemReq};
use crate::api::rest::error::{ApiError, ErrorResponse};
use crate::domain::service::Service;

/// List all items
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "items",
    operation_id = "shopping_list.list_items",
    responses(
        (status = 200, description = "All items in creation order", body = [ItemDto]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_items(
    Extension(svc): Extension<std::sync::Arc<Service>>,
) -> Result<Json<Vec<ItemDto>>, ApiError> {
    let items = svc.list_items().await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/api/items",
    tag = "items",
    operation_id = "shopping_list.create_item",
    request_body = CreateItemReq,
    responses(
        (status = 201, description = "Created item", body = ItemDto),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_item(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Json(req): Json<CreateItemReq>,
) -> Result<(StatusCode, Json<ItemDto>), ApiError> {
    info!("Creating item: {:?}", req);

    let item = svc.create_item(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ItemDto::from(item))))
}

/// Update an existing item (partial)
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    tag = "items",
    operation_id = "shopping_list.update_item",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = UpdateItemReq,
    responses(
        (status = 200, description = "Updated item", body = ItemDto),
        (status = 404, description = "Unknown item id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_item(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateItemReq>,
) -> Result<Json<ItemDto>, ApiError> {
    info!("Updating item {} with: {:?}", id, req);

    let item = svc.update_item(id, req.into()).await?;
    Ok(Json(ItemDto::from(item)))
}

/// Delete an item by id
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "items",
    operation_id = "shopping_list.delete_item",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Unknown item id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_item(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    info!("Deleting item: {}", id);

    svc.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every bought item
#[utoipa::path(
    delete,
    path = "/api/items/bought/clear",
    tag = "items",
    operation_id = "shopping_list.clear_bought",
    responses(
        (status = 204, description = "Bought items removed (no-op when none)"),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn clear_bought(
    Extension(svc): Extension<std::sync::Arc<Service>>,
) -> Result<StatusCode, ApiError> {
    info!("Clearing bought items");

    svc.clear_bought().await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::item::{CreateItemRequest, ItemDto, UpdateItemRequest},
    error::AppError,
    services::item_service,
    state::SharedState,
};

/// Routes handling item CRUD.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", put(update_item).delete(delete_item))
}

#[utoipa::path(
    get,
    path = "/items",
    tag = "item",
    responses((status = 200, description = "All stored items", body = [ItemDto]))
)]
/// List every stored item in insertion order.
pub async fn list_items(State(state): State<SharedState>) -> Result<Json<Vec<ItemDto>>, AppError> {
    let items = item_service::list_items(&state).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/items",
    tag = "item",
    request_body = CreateItemRequest,
    responses((status = 200, description = "Item created", body = ItemDto))
)]
/// Persist a new item label.
pub async fn create_item(
    State(state): State<SharedState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<Json<ItemDto>, AppError> {
    payload.validate()?;
    let item = item_service::add_item(&state, payload).await?;
    Ok(Json(item))
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "item",
    params(("id" = Uuid, Path, description = "Identifier of the item to update")),
    request_body = UpdateItemRequest,
    responses((status = 200, description = "Item updated", body = ItemDto))
)]
/// Apply a partial update to an item.
pub async fn update_item(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ItemDto>, AppError> {
    payload.validate()?;
    let item = item_service::update_item(&state, id, payload).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "item",
    params(("id" = Uuid, Path, description = "Identifier of the item to delete")),
    responses((status = 204, description = "Item deleted"))
)]
/// Delete an item.
pub async fn delete_item(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    item_service::delete_item(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Item endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{CommentDto, ItemDto},
};

use super::{default_from, default_size, SharerUserId};

#[derive(Deserialize)]
pub struct ItemListQuery {
    #[serde(default = "default_from")]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub text: String,
    #[serde(default = "default_from")]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

/// List items owned by the requesting user
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("from" = Option<i64>, Query, description = "Index of the first element (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)")
    ),
    responses(
        (status = 200, description = "Items of the owner with booking summaries", body = Vec<ItemDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<ItemListQuery>,
) -> AppResult<Json<Vec<ItemDto>>> {
    let items = state
        .services
        .items
        .get_items_of_user(user_id, query.from, query.size)
        .await?;
    Ok(Json(items))
}

/// Get an item by id
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item with comments, booking summaries for the owner", body = ItemDto),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemDto>> {
    let item = state.services.items.get_item(id, user_id).await?;
    Ok(Json(item))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id")
    ),
    request_body = ItemDto,
    responses(
        (status = 201, description = "Item created", body = ItemDto),
        (status = 400, description = "Missing name, description or availability"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(payload): Json<ItemDto>,
) -> AppResult<(StatusCode, Json<ItemDto>)> {
    tracing::info!("User {} creating item {:?}", user_id, payload.name);
    let created = state.services.items.create_item(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update selected fields of an item
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = ItemDto,
    responses(
        (status = 200, description = "Item updated", body = ItemDto),
        (status = 404, description = "Item not found or not owned by the user")
    )
)]
pub async fn patch_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Json(payload): Json<ItemDto>,
) -> AppResult<Json<ItemDto>> {
    tracing::info!("User {} updating item {}", user_id, id);
    let updated = state
        .services
        .items
        .patch_item(id, user_id, payload)
        .await?;
    Ok(Json(updated))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id"),
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    tracing::info!("User {} deleting item {}", user_id, id);
    state.services.items.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search items by text
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("text" = String, Query, description = "Text to match in name or description"),
        ("from" = Option<i64>, Query, description = "Index of the first element (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)")
    ),
    responses(
        (status = 200, description = "Items matching the text", body = Vec<ItemDto>)
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ItemDto>>> {
    let items = state
        .services
        .items
        .search_items(&query.text, user_id, query.from, query.size)
        .await?;
    Ok(Json(items))
}

/// Add a comment to an item the author has already booked
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Comment author id"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = CommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Empty text or author never booked the item"),
        (status = 404, description = "Item or user not found")
    )
)]
pub async fn add_comment(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Json(payload): Json<CommentDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    tracing::info!("User {} commenting on item {}", user_id, id);
    let created = state
        .services
        .items
        .add_comment(id, user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

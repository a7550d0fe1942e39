//! Item request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{RequestDtoIn, RequestDtoOut},
};

use super::{default_from, default_size, SharerUserId};

#[derive(Deserialize)]
pub struct RequestListQuery {
    #[serde(default = "default_from")]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

/// Create an item request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requestor id")
    ),
    request_body = RequestDtoIn,
    responses(
        (status = 201, description = "Request created", body = RequestDtoOut),
        (status = 400, description = "Empty description"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(payload): Json<RequestDtoIn>,
) -> AppResult<(StatusCode, Json<RequestDtoOut>)> {
    tracing::info!("User {} creating item request", user_id);
    let created = state
        .services
        .requests
        .create_request(user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the requesting user's own item requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requestor id")
    ),
    responses(
        (status = 200, description = "Own requests with matching items", body = Vec<RequestDtoOut>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_own_requests(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Json<Vec<RequestDtoOut>>> {
    let requests = state.services.requests.get_own_requests(user_id).await?;
    Ok(Json(requests))
}

/// List item requests created by other users
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("from" = Option<i64>, Query, description = "Index of the first element (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)")
    ),
    responses(
        (status = 200, description = "Requests of other users, newest first", body = Vec<RequestDtoOut>),
        (status = 400, description = "Invalid page bounds"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_other_requests(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<RequestListQuery>,
) -> AppResult<Json<Vec<RequestDtoOut>>> {
    let requests = state
        .services
        .requests
        .get_other_requests(user_id, query.from, query.size)
        .await?;
    Ok(Json(requests))
}

/// Get a single item request
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Request id")
    ),
    responses(
        (status = 200, description = "Request with matching items", body = RequestDtoOut),
        (status = 404, description = "Request or user not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Json<RequestDtoOut>> {
    let request = state.services.requests.get_request(user_id, id).await?;
    Ok(Json(request))
}

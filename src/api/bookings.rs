//! Booking lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{BookingDtoIn, BookingDtoOut},
};

use super::{default_from, default_size, SharerUserId};

#[derive(Deserialize)]
pub struct BookingListQuery {
    pub state: Option<String>,
    #[serde(default = "default_from")]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

#[derive(Deserialize)]
pub struct ApproveQuery {
    pub approved: bool,
}

/// Create a booking in WAITING status
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker id")
    ),
    request_body = BookingDtoIn,
    responses(
        (status = 201, description = "Booking created", body = BookingDtoOut),
        (status = 400, description = "Item unavailable or dates not valid"),
        (status = 404, description = "Item or user not found, or booker owns the item")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(payload): Json<BookingDtoIn>,
) -> AppResult<(StatusCode, Json<BookingDtoOut>)> {
    tracing::info!("User {} booking item {:?}", user_id, payload.item_id);
    let created = state
        .services
        .bookings
        .create_booking(user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner id"),
        ("id" = i64, Path, description = "Booking id"),
        ("approved" = bool, Query, description = "true approves, false rejects")
    ),
    responses(
        (status = 200, description = "Booking status updated", body = BookingDtoOut),
        (status = 400, description = "Booking already approved"),
        (status = 404, description = "Booking not found or user does not own the item")
    )
)]
pub async fn patch_booking(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Query(query): Query<ApproveQuery>,
) -> AppResult<Json<BookingDtoOut>> {
    tracing::info!(
        "User {} setting booking {} approved={}",
        user_id,
        id,
        query.approved
    );
    let updated = state
        .services
        .bookings
        .patch_booking(user_id, id, query.approved)
        .await?;
    Ok(Json(updated))
}

/// Get a booking visible to its booker or the item owner
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDtoOut),
        (status = 404, description = "Booking not found or not visible to the user")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingDtoOut>> {
    let booking = state.services.bookings.get_booking(user_id, id).await?;
    Ok(Json(booking))
}

/// List bookings made by the requesting user
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker id"),
        ("state" = Option<String>, Query, description = "ALL, CURRENT, FUTURE, PAST, WAITING or REJECTED (default: ALL)"),
        ("from" = Option<i64>, Query, description = "Index of the first element (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)")
    ),
    responses(
        (status = 200, description = "Bookings of the booker, most recent start first", body = Vec<BookingDtoOut>),
        (status = 400, description = "Unknown state keyword"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDtoOut>>> {
    let state_raw = query.state.as_deref().unwrap_or("ALL");
    let bookings = state
        .services
        .bookings
        .bookings_of_booker(user_id, state_raw, query.from, query.size)
        .await?;
    Ok(Json(bookings))
}

/// List bookings on items owned by the requesting user
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id"),
        ("state" = Option<String>, Query, description = "ALL, CURRENT, FUTURE, PAST, WAITING or REJECTED (default: ALL)"),
        ("from" = Option<i64>, Query, description = "Index of the first element (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 10)")
    ),
    responses(
        (status = 200, description = "Bookings on the owner's items, latest end first", body = Vec<BookingDtoOut>),
        (status = 400, description = "Unknown state keyword"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_owner_bookings(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDtoOut>>> {
    let state_raw = query.state.as_deref().unwrap_or("ALL");
    let bookings = state
        .services
        .bookings
        .bookings_of_owner(user_id, state_raw, query.from, query.size)
        .await?;
    Ok(Json(bookings))
}

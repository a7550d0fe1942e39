//! API handlers for Lendit REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, AppState};

/// Header carrying the acting user's id
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

pub(crate) fn default_from() -> i64 {
    0
}

pub(crate) fn default_size() -> i64 {
    10
}

/// Extractor for the acting user taken from the `X-Sharer-User-Id` header.
/// The id is not resolved against the store here; services decide whether
/// the user must exist.
pub struct SharerUserId(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for SharerUserId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("Missing {} header", USER_ID_HEADER)))?;

        let user_id = raw.trim().parse::<i64>().map_err(|_| {
            AppError::BadRequest(format!("Invalid {} header: {}", USER_ID_HEADER, raw))
        })?;

        Ok(SharerUserId(user_id))
    }
}

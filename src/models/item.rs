//! Item model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::booking::BookingShortDto;
use super::comment::CommentDto;
use crate::error::{AppError, AppResult};

/// Item entity from database
#[derive(Debug, Clone, Eq, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

// Entity identity: two items are the same item iff they share an id.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Item {
    /// Builds an unsaved item from a create payload. The id is assigned by
    /// the store on insert.
    pub fn from_dto(dto: &ItemDto, owner_id: i64) -> AppResult<Item> {
        let name = dto
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Item name must not be empty".to_string()))?;
        let description = dto
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("Item description must not be empty".to_string())
            })?;
        let available = dto
            .available
            .ok_or_else(|| AppError::Validation("Item must have an available flag".to_string()))?;

        Ok(Item {
            id: 0,
            name: name.to_string(),
            description: description.to_string(),
            is_available: available,
            owner_id,
            request_id: dto.request_id,
        })
    }

    /// Field-level merge: absent patch fields keep the stored value.
    pub fn apply_patch(&mut self, patch: &ItemDto) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(available) = patch.available {
            self.is_available = available;
        }
    }

    /// Plain wire mapping; comments and last/next bookings stay empty.
    /// Read paths fill them in through the item service.
    pub fn to_dto(&self) -> ItemDto {
        ItemDto {
            id: Some(self.id),
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            available: Some(self.is_available),
            request_id: self.request_id,
            comments: None,
            last_booking: None,
            next_booking: None,
        }
    }
}

/// Wire representation of an item. Serves both as create/patch payload and
/// as response body; `comments`, `lastBooking` and `nextBooking` are only
/// populated on read paths, never accepted from the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
    pub request_id: Option<i64>,
    pub comments: Option<Vec<CommentDto>>,
    pub last_booking: Option<BookingShortDto>,
    pub next_booking: Option<BookingShortDto>,
}

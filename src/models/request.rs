//! Item request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::item::ItemDto;

/// Item request entity from database
#[derive(Debug, Clone, Eq, FromRow)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: DateTime<Utc>,
}

// Entity identity: two requests are the same request iff they share an id.
impl PartialEq for ItemRequest {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl ItemRequest {
    /// Wire mapping with the items offered for this request attached.
    pub fn to_dto(&self, items: Vec<ItemDto>) -> RequestDtoOut {
        RequestDtoOut {
            id: self.id,
            description: self.description.clone(),
            created: self.created,
            items,
        }
    }
}

/// Create item request payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RequestDtoIn {
    pub description: Option<String>,
}

/// Item request response with the items offered for it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestDtoOut {
    pub id: i64,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemDto>,
}

//! Comment model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Comment entity from database
#[derive(Debug, Clone, Eq, FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime<Utc>,
}

// Entity identity: two comments are the same comment iff they share an id.
impl PartialEq for Comment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Comment joined with its author's name for display
#[derive(Debug, Clone, FromRow)]
pub struct CommentView {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

/// Wire representation of a comment. Input carries `text` (and optionally
/// `created`); responses carry every field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: Option<i64>,
    pub text: Option<String>,
    pub author_name: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl From<&CommentView> for CommentDto {
    fn from(view: &CommentView) -> Self {
        CommentDto {
            id: Some(view.id),
            text: Some(view.text.clone()),
            author_name: Some(view.author_name.clone()),
            created: Some(view.created),
        }
    }
}

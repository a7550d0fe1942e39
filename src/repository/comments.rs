//! Comments repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_conflict, AppResult},
    models::comment::{Comment, CommentView},
};

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new comment
    pub async fn create(&self, comment: &Comment) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&comment.text)
        .bind(comment.item_id)
        .bind(comment.author_id)
        .bind(comment.created)
        .fetch_one(&self.pool)
        .await
        .map_err(map_conflict)?;

        Ok(comment)
    }

    /// All comments on an item with their author names, id order
    pub async fn find_by_item(&self, item_id: i64) -> AppResult<Vec<CommentView>> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.id, c.text, u.name AS author_name, c.created
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.item_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}

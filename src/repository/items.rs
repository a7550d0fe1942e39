//! Items repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_conflict, AppResult},
    models::{item::Item, page::PageWindow},
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find an item by ID
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Insert a new item
    pub async fn create(&self, item: &Item) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, is_available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.is_available)
        .bind(item.owner_id)
        .bind(item.request_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_conflict)?;

        Ok(item)
    }

    /// Write back a patched item row
    pub async fn update(&self, item: &Item) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items SET name = $1, description = $2, is_available = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.is_available)
        .bind(item.id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_conflict)?;

        Ok(item)
    }

    /// Delete an item; reports whether a row was removed
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Page through an owner's items
    pub async fn find_by_owner(&self, owner_id: i64, window: &PageWindow) -> AppResult<Vec<Item>> {
        let query = format!(
            "SELECT * FROM items WHERE owner_id = $1 {} LIMIT $2 OFFSET $3",
            window.order_clause()
        );
        let items = sqlx::query_as::<_, Item>(&query)
            .bind(owner_id)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Text search over name and description. Matching on description alone
    /// only surfaces items that are currently available.
    pub async fn search(&self, text: &str, window: &PageWindow) -> AppResult<Vec<Item>> {
        let pattern = format!("%{}%", text);
        let query = format!(
            r#"
            SELECT * FROM items
            WHERE name ILIKE $1 OR (description ILIKE $1 AND is_available)
            {} LIMIT $2 OFFSET $3
            "#,
            window.order_clause()
        );
        let items = sqlx::query_as::<_, Item>(&query)
            .bind(pattern)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Items offered for a given request
    pub async fn find_by_request(&self, request_id: i64) -> AppResult<Vec<Item>> {
        let items =
            sqlx::query_as::<_, Item>("SELECT * FROM items WHERE request_id = $1 ORDER BY id")
                .bind(request_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(items)
    }
}

//! Item requests repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_conflict, AppError, AppResult},
    models::{page::PageWindow, request::ItemRequest},
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a request by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<ItemRequest> {
        sqlx::query_as::<_, ItemRequest>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// Insert a new request
    pub async fn create(&self, request: &ItemRequest) -> AppResult<ItemRequest> {
        let request = sqlx::query_as::<_, ItemRequest>(
            r#"
            INSERT INTO requests (description, requestor_id, created)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&request.description)
        .bind(request.requestor_id)
        .bind(request.created)
        .fetch_one(&self.pool)
        .await
        .map_err(map_conflict)?;

        Ok(request)
    }

    /// All requests made by one user, id order
    pub async fn find_by_requestor(&self, requestor_id: i64) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            "SELECT * FROM requests WHERE requestor_id = $1 ORDER BY id",
        )
        .bind(requestor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Page through requests made by everyone else
    pub async fn find_by_other_requestors(
        &self,
        requestor_id: i64,
        window: &PageWindow,
    ) -> AppResult<Vec<ItemRequest>> {
        let query = format!(
            "SELECT * FROM requests WHERE requestor_id != $1 {} LIMIT $2 OFFSET $3",
            window.order_clause()
        );
        let requests = sqlx::query_as::<_, ItemRequest>(&query)
            .bind(requestor_id)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }
}

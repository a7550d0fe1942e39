//! Shared entity lookups used across services

use crate::{
    error::{AppError, AppResult},
    models::{item::Item, user::User},
    repository::Repository,
};

#[derive(Clone)]
pub struct CommonService {
    repository: Repository,
}

impl CommonService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Resolve a user by ID or fail NotFound
    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repository
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Resolve an item by ID or fail NotFound
    pub async fn get_item(&self, id: i64) -> AppResult<Item> {
        self.repository
            .items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }
}

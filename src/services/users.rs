//! User management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, UserDto},
    repository::Repository,
};

use super::common::CommonService;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    common: CommonService,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self {
            common: CommonService::new(repository.clone()),
            repository,
        }
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> AppResult<UserDto> {
        let user = self.common.get_user(id).await?;
        Ok(UserDto::from(user))
    }

    /// List all users
    pub async fn get_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.repository.users.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Create a user. Email validity is checked before anything touches the
    /// store; a duplicate email surfaces as Conflict from the insert.
    pub async fn create_user(&self, payload: CreateUser) -> AppResult<UserDto> {
        payload
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let email = payload
            .email
            .ok_or_else(|| AppError::Validation("Email not valid".to_string()))?;
        let name = payload
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Name must not be empty".to_string()))?;

        let user = self.repository.users.create(&name, &email).await?;
        Ok(UserDto::from(user))
    }

    /// Patch a user; absent fields stay untouched. A patched email still has
    /// to look like an email.
    pub async fn patch_user(&self, id: i64, patch: UpdateUser) -> AppResult<UserDto> {
        patch
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let mut user = self.common.get_user(id).await?;
        user.apply_patch(&patch);
        let user = self.repository.users.update(&user).await?;
        Ok(UserDto::from(user))
    }

    /// Delete a user by ID
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        if !self.repository.users.delete(id).await? {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }
}

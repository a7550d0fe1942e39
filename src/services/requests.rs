//! Item request management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        item::Item,
        page::PageWindow,
        request::{ItemRequest, RequestDtoIn, RequestDtoOut},
    },
    repository::Repository,
};

use super::common::CommonService;

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    common: CommonService,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            common: CommonService::new(repository.clone()),
            repository,
        }
    }

    /// Create a request; `created` is stamped server-side
    pub async fn create_request(
        &self,
        user_id: i64,
        payload: RequestDtoIn,
    ) -> AppResult<RequestDtoOut> {
        let requestor = self.common.get_user(user_id).await?;
        let description = payload
            .description
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("Request description must not be empty".to_string())
            })?;

        let request = ItemRequest {
            id: 0,
            description,
            requestor_id: requestor.id,
            created: Utc::now(),
        };
        let saved = self.repository.requests.create(&request).await?;
        Ok(saved.to_dto(Vec::new()))
    }

    /// The caller's own requests with the items offered for each
    pub async fn get_own_requests(&self, user_id: i64) -> AppResult<Vec<RequestDtoOut>> {
        let requestor = self.common.get_user(user_id).await?;
        let requests = self
            .repository
            .requests
            .find_by_requestor(requestor.id)
            .await?;
        self.attach_items(requests).await
    }

    /// Page through other users' requests, newest first
    pub async fn get_other_requests(
        &self,
        user_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<RequestDtoOut>> {
        let requestor = self.common.get_user(user_id).await?;
        let window = PageWindow::new(from, size, Some("created"))?;
        let requests = self
            .repository
            .requests
            .find_by_other_requestors(requestor.id, &window)
            .await?;
        self.attach_items(requests).await
    }

    /// A single request by ID, readable by any resolvable user
    pub async fn get_request(&self, user_id: i64, request_id: i64) -> AppResult<RequestDtoOut> {
        self.common.get_user(user_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;
        let items = self.repository.items.find_by_request(request.id).await?;
        Ok(request.to_dto(items.iter().map(Item::to_dto).collect()))
    }

    async fn attach_items(&self, requests: Vec<ItemRequest>) -> AppResult<Vec<RequestDtoOut>> {
        let mut result = Vec::with_capacity(requests.len());
        for request in requests {
            let items = self.repository.items.find_by_request(request.id).await?;
            result.push(request.to_dto(items.iter().map(Item::to_dto).collect()));
        }
        Ok(result)
    }
}

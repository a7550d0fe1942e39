//! Item management service: CRUD, search, the read-path view assembly and
//! comment creation.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingShortDto, BookingStatus},
        comment::{Comment, CommentDto},
        item::{Item, ItemDto},
        page::PageWindow,
    },
    repository::Repository,
};

use super::common::CommonService;

/// Latest finished booking: maximal `end` among those with `end < now`.
/// The input arrives id-ordered and the sort is stable, so equal end times
/// resolve to the lower booking id.
fn pick_last_booking(bookings: &[Booking], now: DateTime<Utc>) -> Option<&Booking> {
    let mut sorted: Vec<&Booking> = bookings.iter().collect();
    sorted.sort_by(|a, b| b.end_date.cmp(&a.end_date));
    sorted.into_iter().find(|b| b.end_date < now)
}

/// Upcoming booking: minimal `start` among those still ending after `now`.
/// Same stable-sort tie handling as [`pick_last_booking`].
fn pick_next_booking(bookings: &[Booking], now: DateTime<Utc>) -> Option<&Booking> {
    let mut sorted: Vec<&Booking> = bookings.iter().collect();
    sorted.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    sorted.into_iter().find(|b| b.end_date > now)
}

/// Comment eligibility over the item's whole booking set: some booking on
/// the item is approved or waiting (any booker), and the author has a
/// booking on it that already started. Two independent existential checks.
fn comment_allowed(bookings: &[Booking], author_id: i64, now: DateTime<Utc>) -> bool {
    let item_was_booked = bookings
        .iter()
        .any(|b| b.status == BookingStatus::Approved || b.status == BookingStatus::Waiting);
    let author_booking_started = bookings
        .iter()
        .any(|b| b.booker_id == author_id && b.start_date < now);
    item_was_booked && author_booking_started
}

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
    common: CommonService,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            common: CommonService::new(repository.clone()),
            repository,
        }
    }

    /// Create an item owned by the calling user
    pub async fn create_item(&self, user_id: i64, payload: ItemDto) -> AppResult<ItemDto> {
        let owner = self.common.get_user(user_id).await?;
        let item = Item::from_dto(&payload, owner.id)?;
        let item = self.repository.items.create(&item).await?;
        Ok(item.to_dto())
    }

    /// Patch an item; only its owner may do so. A non-owner gets NotFound
    /// rather than a forbidden status. The response is the owner's view,
    /// booking summaries included.
    pub async fn patch_item(&self, item_id: i64, user_id: i64, payload: ItemDto) -> AppResult<ItemDto> {
        let mut item = self.common.get_item(item_id).await?;
        if item.owner_id != user_id {
            return Err(AppError::NotFound(format!(
                "User {} does not own item {}",
                user_id, item_id
            )));
        }
        item.apply_patch(&payload);
        let item = self.repository.items.update(&item).await?;
        self.assemble(item, user_id).await
    }

    /// Delete an item by ID
    pub async fn delete_item(&self, item_id: i64) -> AppResult<()> {
        if !self.repository.items.delete(item_id).await? {
            return Err(AppError::NotFound(format!(
                "Item with id {} not found",
                item_id
            )));
        }
        Ok(())
    }

    /// A single item as seen by the given viewer
    pub async fn get_item(&self, item_id: i64, viewer_id: i64) -> AppResult<ItemDto> {
        let item = self.common.get_item(item_id).await?;
        self.assemble(item, viewer_id).await
    }

    /// The calling user's items, each with owner-visible booking info
    pub async fn get_items_of_user(
        &self,
        user_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemDto>> {
        let owner = self.common.get_user(user_id).await?;
        let window = PageWindow::new(from, size, None)?;
        let items = self.repository.items.find_by_owner(owner.id, &window).await?;

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            result.push(self.assemble(item, user_id).await?);
        }
        Ok(result)
    }

    /// Text search; an empty query returns nothing without touching the
    /// store. The caller's id only feeds view assembly and is not resolved
    /// against the store.
    pub async fn search_items(
        &self,
        text: &str,
        user_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemDto>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let window = PageWindow::new(from, size, None)?;
        let items = self.repository.items.search(text, &window).await?;

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            result.push(self.assemble(item, user_id).await?);
        }
        Ok(result)
    }

    /// Comment on an item the author has already had in hand
    pub async fn add_comment(
        &self,
        item_id: i64,
        user_id: i64,
        payload: CommentDto,
    ) -> AppResult<CommentDto> {
        let text = payload
            .text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Comment text must not be empty".to_string()))?;
        let item = self.common.get_item(item_id).await?;
        let author = self.common.get_user(user_id).await?;

        let bookings = self.repository.bookings.find_by_item(item.id).await?;
        let now = Utc::now();
        if !comment_allowed(&bookings, author.id, now) {
            return Err(AppError::Validation(format!(
                "User {} has no started booking on item {}",
                user_id, item_id
            )));
        }

        let comment = Comment {
            id: 0,
            text: text.to_string(),
            item_id: item.id,
            author_id: author.id,
            created: payload.created.unwrap_or(now),
        };
        let saved = self.repository.comments.create(&comment).await?;

        Ok(CommentDto {
            id: Some(saved.id),
            text: Some(saved.text),
            author_name: Some(author.name),
            created: Some(saved.created),
        })
    }

    /// Read-path view: comments always, last/next booking only when the
    /// viewer owns the item. Last and next are two separate passes over the
    /// item's full booking set.
    async fn assemble(&self, item: Item, viewer_id: i64) -> AppResult<ItemDto> {
        let comments = self.repository.comments.find_by_item(item.id).await?;

        let mut dto = item.to_dto();
        dto.comments = Some(comments.iter().map(CommentDto::from).collect());

        if item.owner_id == viewer_id {
            let bookings = self.repository.bookings.find_by_item(item.id).await?;
            let now = Utc::now();
            dto.last_booking = pick_last_booking(&bookings, now).map(BookingShortDto::from);
            dto.next_booking = pick_next_booking(&bookings, now).map(BookingShortDto::from);
        }
        Ok(dto)
    }
}

//! Booking management service: creation, the approve/reject transition and
//! the state-filtered listings for both scopes.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDtoIn, BookingDtoOut, BookingState, BookingStatus},
        page::PageWindow,
    },
    repository::Repository,
};

use super::common::CommonService;

fn parse_state(raw: &str) -> AppResult<BookingState> {
    BookingState::parse(raw).ok_or_else(|| AppError::UnknownState(raw.to_string()))
}

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    common: CommonService,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            common: CommonService::new(repository.clone()),
            repository,
        }
    }

    /// Create a booking. Status is forced to WAITING no matter what the
    /// caller sent; the owner booking their own item is masked as NotFound.
    pub async fn create_booking(
        &self,
        user_id: i64,
        payload: BookingDtoIn,
    ) -> AppResult<BookingDtoOut> {
        let booker = self.common.get_user(user_id).await?;
        let item_id = payload
            .item_id
            .ok_or_else(|| AppError::Validation("Booking must reference an item".to_string()))?;
        let item = self.common.get_item(item_id).await?;
        let start = payload
            .start
            .ok_or_else(|| AppError::Validation("Booking start must be set".to_string()))?;
        let end = payload
            .end
            .ok_or_else(|| AppError::Validation("Booking end must be set".to_string()))?;

        if !item.is_available {
            return Err(AppError::Validation(format!(
                "Item {} is not available",
                item.id
            )));
        }
        let now = Utc::now();
        if start < now || end < now || start >= end {
            return Err(AppError::Validation(
                "Booking dates are not valid".to_string(),
            ));
        }
        if item.owner_id == booker.id {
            return Err(AppError::NotFound(format!(
                "Item {} cannot be booked by its owner",
                item.id
            )));
        }

        let booking = Booking {
            id: 0,
            start_date: start,
            end_date: end,
            item_id: item.id,
            booker_id: booker.id,
            status: BookingStatus::Waiting,
        };
        let view = self.repository.bookings.create(&booking).await?;
        Ok(BookingDtoOut::from(&view))
    }

    /// Approve or reject a booking; only the item's owner may transition it
    pub async fn patch_booking(
        &self,
        user_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> AppResult<BookingDtoOut> {
        let view = self.repository.bookings.get_by_id(booking_id).await?;
        let caller = self.common.get_user(user_id).await?;

        if view.item.owner_id != caller.id {
            return Err(AppError::NotFound(format!(
                "User {} does not own item {}",
                user_id, view.item.id
            )));
        }
        if !view.item.is_available {
            return Err(AppError::Validation(format!(
                "Item {} is not available",
                view.item.id
            )));
        }
        if view.booking.status == BookingStatus::Approved && approved {
            return Err(AppError::Validation(
                "Booking is already approved".to_string(),
            ));
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let view = self.repository.bookings.update_status(booking_id, status).await?;
        Ok(BookingDtoOut::from(&view))
    }

    /// A booking by ID, visible to the item owner and the booker only.
    /// Anyone else gets NotFound, not a forbidden status.
    pub async fn get_booking(&self, user_id: i64, booking_id: i64) -> AppResult<BookingDtoOut> {
        let view = self.repository.bookings.get_by_id(booking_id).await?;
        let caller = self.common.get_user(user_id).await?;

        if view.booker.id != caller.id && view.item.owner_id != caller.id {
            return Err(AppError::NotFound(format!(
                "Booking with id {} not found",
                booking_id
            )));
        }
        Ok(BookingDtoOut::from(&view))
    }

    /// Bookings placed by the caller. Each state maps to its own store
    /// finder; all of them come back start-descending.
    pub async fn bookings_of_booker(
        &self,
        user_id: i64,
        state: &str,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingDtoOut>> {
        let state = parse_state(state)?;
        let booker = self.common.get_user(user_id).await?;
        let window = PageWindow::new(from, size, Some("start_date"))?;
        let now = Utc::now();

        let bookings = &self.repository.bookings;
        let views = match state {
            BookingState::All => bookings.find_by_booker(booker.id, &window).await?,
            BookingState::Current => {
                bookings.find_by_booker_current(booker.id, now, &window).await?
            }
            BookingState::Future => {
                bookings.find_by_booker_future(booker.id, now, &window).await?
            }
            BookingState::Past => bookings.find_by_booker_past(booker.id, now, &window).await?,
            BookingState::Waiting => {
                bookings
                    .find_by_booker_status(booker.id, BookingStatus::Waiting, &window)
                    .await?
            }
            BookingState::Rejected => {
                bookings
                    .find_by_booker_status(booker.id, BookingStatus::Rejected, &window)
                    .await?
            }
        };
        Ok(views.iter().map(BookingDtoOut::from).collect())
    }

    /// Bookings across the caller's items. One join query fetches the whole
    /// window end-descending; the state predicate is then applied in memory
    /// against `now` taken here, without re-sorting.
    pub async fn bookings_of_owner(
        &self,
        user_id: i64,
        state: &str,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingDtoOut>> {
        let state = parse_state(state)?;
        let owner = self.common.get_user(user_id).await?;
        let window = PageWindow::new(from, size, None)?;

        let views = self
            .repository
            .bookings
            .find_by_owner_items(owner.id, &window)
            .await?;
        let now = Utc::now();

        Ok(views
            .iter()
            .filter(|v| state.matches(&v.booking, now))
            .map(BookingDtoOut::from)
            .collect())
    }
}

//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{map_conflict, AppError, AppResult},
    models::{
        booking::{Booking, BookingStatus, BookingView},
        item::Item,
        page::PageWindow,
        user::User,
    },
};

/// Shared join selecting a booking with its item and booker. All list
/// finders and the by-id lookup build on this projection.
const SELECT_VIEW: &str = r#"
SELECT b.id, b.start_date, b.end_date, b.item_id, b.booker_id, b.status,
       i.name AS item_name, i.description AS item_description,
       i.is_available, i.owner_id, i.request_id,
       u.name AS booker_name, u.email AS booker_email
FROM bookings b
JOIN items i ON b.item_id = i.id
JOIN users u ON b.booker_id = u.id
"#;

fn view_from_row(row: &PgRow) -> BookingView {
    let booking = Booking {
        id: row.get("id"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        item_id: row.get("item_id"),
        booker_id: row.get("booker_id"),
        status: row.get("status"),
    };
    let item = Item {
        id: booking.item_id,
        name: row.get("item_name"),
        description: row.get("item_description"),
        is_available: row.get("is_available"),
        owner_id: row.get("owner_id"),
        request_id: row.get("request_id"),
    };
    let booker = User {
        id: booking.booker_id,
        name: row.get("booker_name"),
        email: row.get("booker_email"),
    };
    BookingView {
        booking,
        item,
        booker,
    }
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a booking with its item and booker by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<BookingView> {
        let query = format!("{} WHERE b.id = $1", SELECT_VIEW);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        Ok(view_from_row(&row))
    }

    /// Insert a new booking and return the stored view
    pub async fn create(&self, booking: &Booking) -> AppResult<BookingView> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.item_id)
        .bind(booking.booker_id)
        .bind(booking.status)
        .fetch_one(&self.pool)
        .await
        .map_err(map_conflict)?;

        self.get_by_id(id).await
    }

    /// Overwrite a booking's status and return the stored view
    pub async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<BookingView> {
        sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_conflict)?;

        self.get_by_id(id).await
    }

    /// All bookings placed by a booker
    pub async fn find_by_booker(
        &self,
        booker_id: i64,
        window: &PageWindow,
    ) -> AppResult<Vec<BookingView>> {
        let query = format!(
            "{} WHERE b.booker_id = $1 {} LIMIT $2 OFFSET $3",
            SELECT_VIEW,
            window.order_clause()
        );
        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(view_from_row).collect())
    }

    /// Bookings of a booker running at `now`
    pub async fn find_by_booker_current(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        window: &PageWindow,
    ) -> AppResult<Vec<BookingView>> {
        let query = format!(
            "{} WHERE b.booker_id = $1 AND b.start_date < $2 AND b.end_date > $2 {} LIMIT $3 OFFSET $4",
            SELECT_VIEW,
            window.order_clause()
        );
        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(now)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(view_from_row).collect())
    }

    /// Bookings of a booker starting after `now`
    pub async fn find_by_booker_future(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        window: &PageWindow,
    ) -> AppResult<Vec<BookingView>> {
        let query = format!(
            "{} WHERE b.booker_id = $1 AND b.start_date > $2 {} LIMIT $3 OFFSET $4",
            SELECT_VIEW,
            window.order_clause()
        );
        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(now)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(view_from_row).collect())
    }

    /// Bookings of a booker already over at `now`, rejected ones excluded
    pub async fn find_by_booker_past(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        window: &PageWindow,
    ) -> AppResult<Vec<BookingView>> {
        let query = format!(
            "{} WHERE b.booker_id = $1 AND b.end_date < $2 AND b.status != $3 {} LIMIT $4 OFFSET $5",
            SELECT_VIEW,
            window.order_clause()
        );
        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(now)
            .bind(BookingStatus::Rejected)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(view_from_row).collect())
    }

    /// Bookings of a booker with the given stored status
    pub async fn find_by_booker_status(
        &self,
        booker_id: i64,
        status: BookingStatus,
        window: &PageWindow,
    ) -> AppResult<Vec<BookingView>> {
        let query = format!(
            "{} WHERE b.booker_id = $1 AND b.status = $2 {} LIMIT $3 OFFSET $4",
            SELECT_VIEW,
            window.order_clause()
        );
        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(status)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(view_from_row).collect())
    }

    /// All bookings across an owner's items, end-descending. State filtering
    /// over this result happens in the booking service, not here.
    pub async fn find_by_owner_items(
        &self,
        owner_id: i64,
        window: &PageWindow,
    ) -> AppResult<Vec<BookingView>> {
        let query = format!(
            "{} WHERE i.owner_id = $1 ORDER BY b.end_date DESC LIMIT $2 OFFSET $3",
            SELECT_VIEW
        );
        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(view_from_row).collect())
    }

    /// Every booking on one item, id order. Feeds the last/next derivation
    /// and the comment eligibility check.
    pub async fn find_by_item(&self, item_id: i64) -> AppResult<Vec<Booking>> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE item_id = $1 ORDER BY id")
                .bind(item_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }
}

//! Booking model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

use super::item::{Item, ItemDto};
use super::user::{User, UserDto};

/// Booking lifecycle status: WAITING until the owner approves or rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// SQLx conversion for BookingStatus; stored as text
impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Query-time filter keyword for booking listings. Distinct from
/// [`BookingStatus`]: `CURRENT`, `FUTURE` and `PAST` select by time window,
/// the rest by stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Future,
    Past,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Parses the `state` query parameter, case-insensitively.
    pub fn parse(raw: &str) -> Option<BookingState> {
        match raw.to_uppercase().as_str() {
            "ALL" => Some(BookingState::All),
            "CURRENT" => Some(BookingState::Current),
            "FUTURE" => Some(BookingState::Future),
            "PAST" => Some(BookingState::Past),
            "WAITING" => Some(BookingState::Waiting),
            "REJECTED" => Some(BookingState::Rejected),
            _ => None,
        }
    }

    /// State predicate over one booking, evaluated against the given `now`.
    /// The booker-scope queries and the owner-scope in-memory filter must
    /// agree on these exact conditions.
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => booking.start_date < now && booking.end_date > now,
            BookingState::Future => booking.start_date > now,
            BookingState::Past => {
                booking.end_date < now && booking.status != BookingStatus::Rejected
            }
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Booking entity from database
#[derive(Debug, Clone, Eq, FromRow)]
pub struct Booking {
    pub id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

// Entity identity: two bookings are the same booking iff they share an id.
impl PartialEq for Booking {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Booking joined with its item and booker for display
#[derive(Debug, Clone)]
pub struct BookingView {
    pub booking: Booking,
    pub item: Item,
    pub booker: User,
}

/// Create booking request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDtoIn {
    pub item_id: Option<i64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Booking response with embedded item and booker
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDtoOut {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: ItemDto,
    pub booker: UserDto,
}

impl From<&BookingView> for BookingDtoOut {
    fn from(view: &BookingView) -> Self {
        BookingDtoOut {
            id: view.booking.id,
            start: view.booking.start_date,
            end: view.booking.end_date,
            status: view.booking.status,
            item: view.item.to_dto(),
            booker: UserDto::from(&view.booker),
        }
    }
}

/// Compact booking reference attached to item views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShortDto {
    pub id: i64,
    pub booker_id: i64,
}

impl From<&Booking> for BookingShortDto {
    fn from(booking: &Booking) -> Self {
        BookingShortDto {
            id: booking.id,
            booker_id: booking.booker_id,
        }
    }
}

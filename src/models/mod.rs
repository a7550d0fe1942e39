//! Data models for Lendit

pub mod booking;
pub mod comment;
pub mod item;
pub mod page;
pub mod request;
pub mod user;

// Re-export commonly used types
pub use booking::{
    Booking, BookingDtoIn, BookingDtoOut, BookingShortDto, BookingState, BookingStatus,
    BookingView,
};
pub use comment::{Comment, CommentDto, CommentView};
pub use item::{Item, ItemDto};
pub use page::PageWindow;
pub use request::{ItemRequest, RequestDtoIn, RequestDtoOut};
pub use user::{CreateUser, UpdateUser, User, UserDto};

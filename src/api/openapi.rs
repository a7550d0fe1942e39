//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lendit API",
        version = "1.0.0",
        description = "Item Sharing Service REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::patch_user,
        users::delete_user,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::patch_item,
        items::delete_item,
        items::search_items,
        items::add_comment,
        // Bookings
        bookings::create_booking,
        bookings::patch_booking,
        bookings::get_booking,
        bookings::list_bookings,
        bookings::list_owner_bookings,
        // Requests
        requests::create_request,
        requests::list_own_requests,
        requests::list_other_requests,
        requests::get_request,
    ),
    components(
        schemas(
            // Users
            crate::models::user::UserDto,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Items
            crate::models::item::ItemDto,
            crate::models::comment::CommentDto,
            // Bookings
            crate::models::booking::BookingDtoIn,
            crate::models::booking::BookingDtoOut,
            crate::models::booking::BookingShortDto,
            crate::models::booking::BookingStatus,
            // Requests
            crate::models::request::RequestDtoIn,
            crate::models::request::RequestDtoOut,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "items", description = "Item management and search"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "requests", description = "Item requests")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

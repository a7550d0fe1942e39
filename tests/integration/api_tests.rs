//! API integration tests
//!
//! These tests run against a live server with a clean database:
//! start the server, then `cargo test -- --ignored`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";
const USER_HEADER: &str = "X-Sharer-User-Id";

/// Email addresses must be unique across test runs
fn unique_email(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_nanos();
    format!("{}-{}@lendit.test", tag, nanos)
}

async fn create_user(client: &Client, name: &str, email: &str) -> i64 {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": name, "email": email }))
        .send()
        .await
        .expect("Failed to send create user request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No user ID")
}

async fn create_item(
    client: &Client,
    owner_id: i64,
    name: &str,
    description: &str,
    available: bool,
) -> i64 {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(USER_HEADER, owner_id)
        .json(&json!({
            "name": name,
            "description": description,
            "available": available
        }))
        .send()
        .await
        .expect("Failed to send create item request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No item ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_user_crud() {
    let client = Client::new();
    let email = unique_email("crud");
    let user_id = create_user(&client, "Crud User", &email).await;

    // Read back
    let response = client
        .get(format!("{}/users/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Crud User");
    assert_eq!(body["email"], email.as_str());

    // Patch only the name, the email must survive
    let response = client
        .patch(format!("{}/users/{}", BASE_URL, user_id))
        .json(&json!({ "name": "Renamed User" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Renamed User");
    assert_eq!(body["email"], email.as_str());

    // A patched email still has to be a valid one
    let response = client
        .patch(format!("{}/users/{}", BASE_URL, user_id))
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Delete
    let response = client
        .delete(format!("{}/users/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Gone
    let response = client
        .get(format!("{}/users/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_is_conflict() {
    let client = Client::new();
    let email = unique_email("dup");
    let user_id = create_user(&client, "First", &email).await;

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "Second", "email": email }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let _ = client
        .delete(format!("{}/users/{}", BASE_URL, user_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_create_user_invalid_email() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "Bad Email", "email": "not-an-email" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "No Email" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_missing_user_header() {
    let client = Client::new();

    let response = client
        .post(format!("{}/items", BASE_URL))
        .json(&json!({
            "name": "Ghost Item",
            "description": "No owner header",
            "available": true
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_item_create_get_and_owner_view() {
    let client = Client::new();
    let owner_id = create_user(&client, "Owner", &unique_email("owner-view")).await;
    let other_id = create_user(&client, "Other", &unique_email("other-view")).await;
    let item_id = create_item(&client, owner_id, "Drill", "Cordless drill", true).await;

    // Owner sees booking slots (null while nothing is booked) and comments
    let response = client
        .get(format!("{}/items/{}", BASE_URL, item_id))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Drill");
    assert!(body["lastBooking"].is_null());
    assert!(body["nextBooking"].is_null());
    assert!(body["comments"].as_array().expect("No comments array").is_empty());

    // A non-owner gets the same item without booking slots
    let response = client
        .get(format!("{}/items/{}", BASE_URL, item_id))
        .header(USER_HEADER, other_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["lastBooking"].is_null());
    assert!(body["nextBooking"].is_null());

    // Owner listing includes the item
    let response = client
        .get(format!("{}/items", BASE_URL))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body.as_array().expect("No items array");
    assert!(items.iter().any(|i| i["id"].as_i64() == Some(item_id)));
}

#[tokio::test]
#[ignore]
async fn test_patch_item_by_non_owner_fails() {
    let client = Client::new();
    let owner_id = create_user(&client, "Owner", &unique_email("patch-owner")).await;
    let intruder_id = create_user(&client, "Intruder", &unique_email("patch-intruder")).await;
    let item_id = create_item(&client, owner_id, "Ladder", "Aluminium ladder", true).await;

    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item_id))
        .header(USER_HEADER, intruder_id)
        .json(&json!({ "name": "Stolen Ladder" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_search_items() {
    let client = Client::new();
    let owner_id = create_user(&client, "Searcher", &unique_email("search")).await;
    let marker = format!("zxq{}", unique_email("m").replace(['@', '.', '-'], ""));
    create_item(&client, owner_id, &marker, "Findable thing", true).await;

    let response = client
        .get(format!("{}/items/search?text={}", BASE_URL, marker))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().expect("No items array").len(), 1);

    // Empty text short-circuits to an empty list
    let response = client
        .get(format!("{}/items/search?text=", BASE_URL))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.as_array().expect("No items array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle() {
    let client = Client::new();
    let owner_id = create_user(&client, "Lender", &unique_email("lender")).await;
    let booker_id = create_user(&client, "Borrower", &unique_email("borrower")).await;
    let item_id = create_item(&client, owner_id, "Bike", "City bike", true).await;

    let start = chrono::Utc::now() + chrono::Duration::minutes(1);
    let end = chrono::Utc::now() + chrono::Duration::minutes(10);

    // Booker places a booking, it starts out WAITING
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, booker_id)
        .json(&json!({ "itemId": item_id, "start": start, "end": end }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["id"].as_i64().expect("No booking ID");
    assert_eq!(body["status"], "WAITING");
    assert_eq!(body["booker"]["id"].as_i64(), Some(booker_id));
    assert_eq!(body["item"]["id"].as_i64(), Some(item_id));

    // Visible to the booker and the owner, not to a stranger
    let stranger_id = create_user(&client, "Stranger", &unique_email("stranger")).await;
    for (user, expected) in [(booker_id, 200), (owner_id, 200), (stranger_id, 404)] {
        let response = client
            .get(format!("{}/bookings/{}", BASE_URL, booking_id))
            .header(USER_HEADER, user)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), expected);
    }

    // Booker cannot approve their own booking
    let response = client
        .patch(format!(
            "{}/bookings/{}?approved=true",
            BASE_URL, booking_id
        ))
        .header(USER_HEADER, booker_id)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Owner approves
    let response = client
        .patch(format!(
            "{}/bookings/{}?approved=true",
            BASE_URL, booking_id
        ))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "APPROVED");

    // A second approval is rejected
    let response = client
        .patch(format!(
            "{}/bookings/{}?approved=true",
            BASE_URL, booking_id
        ))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Shows up for the booker and for the owner
    let response = client
        .get(format!("{}/bookings?state=ALL", BASE_URL))
        .header(USER_HEADER, booker_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let bookings = body.as_array().expect("No bookings array");
    assert!(bookings.iter().any(|b| b["id"].as_i64() == Some(booking_id)));

    let response = client
        .get(format!("{}/bookings/owner?state=FUTURE", BASE_URL))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let bookings = body.as_array().expect("No bookings array");
    assert!(bookings.iter().any(|b| b["id"].as_i64() == Some(booking_id)));
}

#[tokio::test]
#[ignore]
async fn test_booking_own_item_rejected() {
    let client = Client::new();
    let owner_id = create_user(&client, "Selfish", &unique_email("selfish")).await;
    let item_id = create_item(&client, owner_id, "Tent", "Two person tent", true).await;

    let start = chrono::Utc::now() + chrono::Duration::minutes(1);
    let end = chrono::Utc::now() + chrono::Duration::minutes(10);

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, owner_id)
        .json(&json!({ "itemId": item_id, "start": start, "end": end }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_booking_unavailable_item_rejected() {
    let client = Client::new();
    let owner_id = create_user(&client, "Hoarder", &unique_email("hoarder")).await;
    let booker_id = create_user(&client, "Hopeful", &unique_email("hopeful")).await;
    let item_id = create_item(&client, owner_id, "Saw", "Broken saw", false).await;

    let start = chrono::Utc::now() + chrono::Duration::minutes(1);
    let end = chrono::Utc::now() + chrono::Duration::minutes(10);

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, booker_id)
        .json(&json!({ "itemId": item_id, "start": start, "end": end }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_dates_in_past_rejected() {
    let client = Client::new();
    let owner_id = create_user(&client, "Past Owner", &unique_email("past-owner")).await;
    let booker_id = create_user(&client, "Past Booker", &unique_email("past-booker")).await;
    let item_id = create_item(&client, owner_id, "Kayak", "Single kayak", true).await;

    let start = chrono::Utc::now() - chrono::Duration::hours(2);
    let end = chrono::Utc::now() - chrono::Duration::hours(1);

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, booker_id)
        .json(&json!({ "itemId": item_id, "start": start, "end": end }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unknown_booking_state() {
    let client = Client::new();
    let user_id = create_user(&client, "Stateless", &unique_email("stateless")).await;

    let response = client
        .get(format!("{}/bookings?state=banana", BASE_URL))
        .header(USER_HEADER, user_id)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Unknown state: banana");
}

#[tokio::test]
#[ignore]
async fn test_invalid_pagination_bounds() {
    let client = Client::new();
    let user_id = create_user(&client, "Paginator", &unique_email("paginator")).await;

    for query in ["from=-1&size=10", "from=0&size=0"] {
        let response = client
            .get(format!("{}/bookings?{}", BASE_URL, query))
            .header(USER_HEADER, user_id)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 400);
    }
}

#[tokio::test]
#[ignore]
async fn test_comment_after_booking_started() {
    let client = Client::new();
    let owner_id = create_user(&client, "Comment Owner", &unique_email("c-owner")).await;
    let booker_id = create_user(&client, "Comment Booker", &unique_email("c-booker")).await;
    let item_id = create_item(&client, owner_id, "Projector", "HD projector", true).await;

    // Commenting without any booking is rejected
    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item_id))
        .header(USER_HEADER, booker_id)
        .json(&json!({ "text": "Too early" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Book a window that starts almost immediately
    let start = chrono::Utc::now() + chrono::Duration::seconds(2);
    let end = chrono::Utc::now() + chrono::Duration::seconds(3);
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, booker_id)
        .json(&json!({ "itemId": item_id, "start": start, "end": end }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["id"].as_i64().expect("No booking ID");

    let response = client
        .patch(format!(
            "{}/bookings/{}?approved=true",
            BASE_URL, booking_id
        ))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Wait until the booking has started and ended
    tokio::time::sleep(Duration::from_secs(4)).await;

    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item_id))
        .header(USER_HEADER, booker_id)
        .json(&json!({ "text": "Bright and quiet" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["text"], "Bright and quiet");
    assert_eq!(body["authorName"], "Comment Booker");

    // The finished booking now shows as lastBooking, for the owner only
    let response = client
        .get(format!("{}/items/{}", BASE_URL, item_id))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["lastBooking"]["bookerId"].as_i64(), Some(booker_id));
    assert_eq!(body["comments"][0]["text"], "Bright and quiet");

    let response = client
        .get(format!("{}/items/{}", BASE_URL, item_id))
        .header(USER_HEADER, booker_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["lastBooking"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_request_lifecycle() {
    let client = Client::new();
    let requestor_id = create_user(&client, "Requestor", &unique_email("requestor")).await;
    let responder_id = create_user(&client, "Responder", &unique_email("responder")).await;

    // Empty description is rejected
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header(USER_HEADER, requestor_id)
        .json(&json!({ "description": "  " }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header(USER_HEADER, requestor_id)
        .json(&json!({ "description": "Need a telescope" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");
    assert!(body["items"].as_array().expect("No items array").is_empty());

    // Responder publishes an item answering the request
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(USER_HEADER, responder_id)
        .json(&json!({
            "name": "Telescope",
            "description": "Refractor telescope",
            "available": true,
            "requestId": request_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Own requests carry the answering items
    let response = client
        .get(format!("{}/requests", BASE_URL))
        .header(USER_HEADER, requestor_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let own = body
        .as_array()
        .expect("No requests array")
        .iter()
        .find(|r| r["id"].as_i64() == Some(request_id))
        .expect("Request not listed")
        .clone();
    assert_eq!(own["items"][0]["name"], "Telescope");

    // Other users see it under /requests/all, the requestor does not
    let response = client
        .get(format!("{}/requests/all", BASE_URL))
        .header(USER_HEADER, responder_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let others = body.as_array().expect("No requests array");
    assert!(others.iter().any(|r| r["id"].as_i64() == Some(request_id)));

    let response = client
        .get(format!("{}/requests/all", BASE_URL))
        .header(USER_HEADER, requestor_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let mine = body.as_array().expect("No requests array");
    assert!(!mine.iter().any(|r| r["id"].as_i64() == Some(request_id)));

    // Fetch by id from a third party
    let response = client
        .get(format!("{}/requests/{}", BASE_URL, request_id))
        .header(USER_HEADER, responder_id)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["description"], "Need a telescope");
}

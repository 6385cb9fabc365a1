//! Bulk actions posted from list pages.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pressroom_core::PublishStatus;
use pressroom_integration_tests::TestApp;

#[tokio::test]
async fn test_bulk_archive_products() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/products/bulk",
            &[
                ("action", "archive"),
                ("ids", "1,2"),
                ("return_to", "/products?status=active"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/products?status=active");
    assert!(app.follow(&response).await.contains("2 products updated"));

    for id in [1, 2] {
        let product = app.store().products().get(id).await.unwrap();
        assert_eq!(product.status, PublishStatus::Archived);
    }
}

#[tokio::test]
async fn test_bulk_delete_skips_unknown_ids() {
    let app = TestApp::new();

    let response = app
        .post_form("/tags/bulk", &[("action", "delete"), ("ids", "5"), ("ids", "6"), ("ids", "42")])
        .await;
    assert_eq!(response.location(), "/tags");
    assert!(app.follow(&response).await.contains("2 tags deleted"));
    assert_eq!(app.store().tags().count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_bulk_with_no_selection_flashes_error() {
    let app = TestApp::new();
    let response = app
        .post_form("/reviews/bulk", &[("action", "approve"), ("ids", "")])
        .await;
    assert_eq!(response.location(), "/reviews");
    assert!(app.follow(&response).await.contains("Select at least one review"));
}

#[tokio::test]
async fn test_unknown_bulk_action_flashes_error() {
    let app = TestApp::new();
    let response = app
        .post_form("/tags/bulk", &[("action", "archive"), ("ids", "1")])
        .await;
    assert!(app.follow(&response).await.contains("Unknown bulk action"));
    assert_eq!(app.store().tags().count().await.unwrap(), 6);
}

#[tokio::test]
async fn test_return_to_outside_list_is_ignored() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/contacts/bulk",
            &[
                ("action", "mark_read"),
                ("ids", "1"),
                ("return_to", "https://example.com/phish"),
            ],
        )
        .await;
    assert_eq!(response.location(), "/contacts");
}

#[tokio::test]
async fn test_flash_session_cookie_expires_quickly() {
    use pressroom_admin::middleware::{SESSION_COOKIE_NAME, SESSION_EXPIRY_SECONDS};

    let app = TestApp::new();
    let response = app
        .post_form("/reviews/bulk", &[("action", "approve"), ("ids", "")])
        .await;

    let set_cookie = response
        .headers
        .get(axum::http::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(set_cookie.starts_with(SESSION_COOKIE_NAME));
    assert!(set_cookie.contains(&format!("Max-Age={SESSION_EXPIRY_SECONDS}")));
    assert!(SESSION_EXPIRY_SECONDS <= 30 * 60);
}

//! Behavior when the simulated backend fails every call.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pressroom_integration_tests::TestApp;

#[tokio::test]
async fn test_list_renders_error_banner() {
    let app = TestApp::failing();
    let response = app.get("/products").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains("Could not load products."));
    assert!(response.contains("temporarily unavailable"));
}

#[tokio::test]
async fn test_dashboard_renders_error_banner() {
    let app = TestApp::failing();
    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains("Could not load the dashboard."));
}

#[tokio::test]
async fn test_detail_is_503() {
    let app = TestApp::failing();
    let response = app.get("/tags/1").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.contains("temporarily unavailable"));
}

#[tokio::test]
async fn test_failed_create_flashes_and_redirects_to_form() {
    let app = TestApp::failing();
    let response = app.post_form("/tags", &[("name", "Glossy")]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/tags/new");

    let form = app.follow(&response).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.contains("Could not create tag: the data service is unavailable"));
}

#[tokio::test]
async fn test_failed_bulk_flashes_error() {
    let app = TestApp::failing();
    let response = app
        .post_form("/tags/bulk", &[("action", "delete"), ("ids", "1")])
        .await;
    assert_eq!(response.location(), "/tags");
    let page = app.follow(&response).await;
    assert!(page.contains("Could not delete tags"));
}

#[tokio::test]
async fn test_json_api_is_503() {
    let app = TestApp::failing();
    assert_eq!(
        app.get("/api/orders").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

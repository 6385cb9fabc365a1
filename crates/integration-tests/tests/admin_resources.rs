//! List, detail and form flows through the generic resource routes.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pressroom_integration_tests::TestApp;

// ============================================================================
// Shell
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = TestApp::new();
    let response = app.get("/tags").await;
    assert!(response.headers.contains_key("x-request-id"));
    assert_eq!(response.headers.get("x-frame-options").unwrap(), "DENY");
    assert!(
        response
            .headers
            .get("content-security-policy")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("default-src 'none'")
    );
}

#[tokio::test]
async fn test_dashboard_shows_stats_and_recent_orders() {
    let app = TestApp::new();
    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains("Dashboard"));
    assert!(response.contains("Pending reviews"));
    assert!(response.contains("Recent orders"));
    assert!(response.contains("href=\"/orders/"));
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
async fn test_product_list_paginates() {
    let app = TestApp::new();
    let total = app.store().products().count().await.unwrap();

    let first = app.get("/products").await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.contains(&format!("1–10 of {total}")));
    assert!(first.contains("rel=\"next\""));
    assert!(first.contains("<table class=\"table\" id=\"products\">"));

    let second = app.get("/products?page=2").await;
    assert!(second.contains(&format!("11–{total} of {total}")));
    assert!(second.contains("rel=\"prev\""));
}

#[tokio::test]
async fn test_product_list_search_and_filter() {
    let app = TestApp::new();

    let response = app.get("/products?q=poster").await;
    assert!(response.contains("Event Posters"));
    assert!(response.contains("Photo Posters"));
    assert!(!response.contains("Kiss-cut Stickers"));

    let response = app.get("/products?status=archived").await;
    assert!(response.contains("Holiday Greeting Cards"));
    assert!(!response.contains("Event Posters"));
}

#[tokio::test]
async fn test_empty_search_shows_no_matches() {
    let app = TestApp::new();
    let response = app.get("/tags?q=nothing-matches-this").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains("No matches"));
}

#[tokio::test]
async fn test_json_list_and_record() {
    let app = TestApp::new();

    let page = app.get("/api/tags?per_page=25&sort=name").await.json();
    assert_eq!(page["total"], 6);
    assert_eq!(page["items"][0]["name"], "Bestseller");

    let tag = app.get("/api/tags/3").await.json();
    assert_eq!(tag["slug"], "premium");

    assert_eq!(app.get("/api/tags/99").await.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Create / update / delete
// ============================================================================

#[tokio::test]
async fn test_create_tag_redirects_with_flash() {
    let app = TestApp::new();

    let response = app.post_form("/tags", &[("name", "Foil Stamped")]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/tags/7");

    let page = app.follow(&response).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("Tag created"));
    assert!(page.contains("foil-stamped"));

    // Flashes are shown once.
    let again = app.get("/tags/7").await;
    assert!(!again.contains("Tag created"));
}

#[tokio::test]
async fn test_invalid_form_rerenders_with_422() {
    let app = TestApp::new();
    let before = app.store().tags().count().await.unwrap();

    let response = app.post_form("/tags", &[("name", ""), ("slug", "keep-me")]).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.contains("is required"));
    assert!(response.contains("value=\"keep-me\""));
    assert_eq!(app.store().tags().count().await.unwrap(), before);
}

#[tokio::test]
async fn test_update_and_delete_tag() {
    let app = TestApp::new();

    let edit = app.get("/tags/4/edit").await;
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.contains("value=\"Same-day\""));

    let response = app
        .post_form("/tags/4", &[("name", "Next-day"), ("slug", "")])
        .await;
    assert_eq!(response.location(), "/tags/4");
    assert!(app.follow(&response).await.contains("Tag updated"));
    assert_eq!(app.store().tags().get(4).await.unwrap().slug, "next-day");

    let response = app.post_form("/tags/4/delete", &[]).await;
    assert_eq!(response.location(), "/tags");
    assert!(app.follow(&response).await.contains("Tag deleted"));
    assert_eq!(app.get("/tags/4").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_record_is_404_page() {
    let app = TestApp::new();
    let response = app.get("/products/999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.contains("product 999 not found"));
}

#[tokio::test]
async fn test_orders_cannot_be_created() {
    let app = TestApp::new();
    assert_eq!(app.get("/orders/new").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.post_form("/orders", &[("status", "pending")]).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_product_form_lists_reference_options() {
    let app = TestApp::new();
    let response = app.get("/products/new").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains("Business Card Options"));
    assert!(response.contains("Bestseller"));
}

#[tokio::test]
async fn test_breadcrumbs_use_record_label() {
    let app = TestApp::new();
    let response = app.get("/products/1").await;
    assert!(response.contains("<a href=\"/products\">Products</a>"));
    assert!(response.contains("Classic Business Cards"));
}

#[tokio::test]
async fn test_flash_sale_detail_lists_sale_prices() {
    let app = TestApp::new();
    let response = app.get("/flash-sales/1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains("Sale prices"));
    assert!(response.contains("$24.99"));
    assert!(response.contains("$19.99"));
    assert!(response.contains("$22.00"));

    // Repricing a product is reflected on the sale.
    let mut product = app.store().products().get(2).await.unwrap();
    product.price = pressroom_core::Money::from_cents(4_000);
    app.store().products().replace(2, product).await.unwrap();
    assert!(app.get("/flash-sales/1").await.contains("$32.00"));
}

//! Integration tests for the orders screen.
//!
//! Requires a running admin server with content backend credentials.
//! Run with: cargo test -- --ignored

use reqwest::StatusCode;

use loomwood_integration_tests::{admin_base_url, signed_in_client};

#[tokio::test]
#[ignore = "Requires running admin server and content backend credentials"]
async fn test_orders_page_renders_both_sections() {
    let client = signed_in_client().await;

    let resp = client
        .get(format!("{}/orders", admin_base_url()))
        .send()
        .await
        .expect("Failed to request orders page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Pending"));
    assert!(body.contains("Completed"));
}

#[tokio::test]
#[ignore = "Requires running admin server and content backend credentials"]
async fn test_complete_on_unknown_order_shows_error_banner() {
    let client = signed_in_client().await;

    let resp = client
        .post(format!(
            "{}/orders/order-does-not-exist/complete",
            admin_base_url()
        ))
        .send()
        .await
        .expect("Failed to post complete");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Could not update the order"));
}

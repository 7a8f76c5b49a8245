//! Integration tests for the users screen.
//!
//! Requires a running admin server with content backend credentials.
//! Run with: cargo test -- --ignored

use reqwest::{Client, StatusCode};
use uuid::Uuid;

use loomwood_integration_tests::{admin_base_url, count_occurrences, signed_in_client};

async fn fetch_users_page(client: &Client) -> String {
    let resp = client
        .get(format!("{}/users", admin_base_url()))
        .send()
        .await
        .expect("Failed to request users page");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.expect("Failed to read response")
}

#[tokio::test]
#[ignore = "Requires running admin server and content backend credentials"]
async fn test_users_page_renders() {
    let client = signed_in_client().await;
    let body = fetch_users_page(&client).await;
    assert!(body.contains("Users"));
    assert!(body.contains("Add user"));
}

#[tokio::test]
#[ignore = "Requires running admin server and content backend credentials"]
async fn test_created_user_appears_exactly_once() {
    let client = signed_in_client().await;
    let email = format!("it-{}@example.com", Uuid::new_v4());

    let resp = client
        .post(format!("{}/users", admin_base_url()))
        .form(&[
            ("name", "Integration Test User"),
            ("email", email.as_str()),
            ("password", "it-password"),
            ("role", "user"),
        ])
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = fetch_users_page(&client).await;
    assert_eq!(count_occurrences(&body, &email), 1);
}

#[tokio::test]
#[ignore = "Requires running admin server and content backend credentials"]
async fn test_create_with_invalid_email_is_rejected() {
    let client = signed_in_client().await;

    let resp = client
        .post(format!("{}/users", admin_base_url()))
        .form(&[
            ("name", "Bad Email User"),
            ("email", "not-an-email"),
            ("password", "it-password"),
            ("role", "user"),
        ])
        .send()
        .await
        .expect("Failed to post user form");

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Enter a valid email address."));
    assert_eq!(count_occurrences(&body, "Bad Email User"), 1); // only in the form buffer
}

#[tokio::test]
#[ignore = "Requires running admin server and content backend credentials"]
async fn test_editor_open_and_cancel_roundtrip() {
    let client = signed_in_client().await;

    let resp = client
        .post(format!("{}/users/editor/new", admin_base_url()))
        .send()
        .await
        .expect("Failed to open editor");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = fetch_users_page(&client).await;
    assert!(body.contains("Add user"));
    assert!(body.contains("Create user"));

    let resp = client
        .post(format!("{}/users/editor/close", admin_base_url()))
        .send()
        .await
        .expect("Failed to close editor");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = fetch_users_page(&client).await;
    assert!(!body.contains("Create user"));
}

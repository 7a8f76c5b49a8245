//! Integration tests for Loomwood Admin.
//!
//! # Running Tests
//!
//! These tests drive a running admin server over HTTP. Start one first:
//!
//! ```bash
//! # Terminal 1: the server (needs SANITY_* and ADMIN_* env vars)
//! cargo run -p loomwood-admin
//!
//! # Terminal 2: the tests
//! ADMIN_BASE_URL=http://localhost:3001 \
//! ADMIN_ALLOWED_EMAIL=admin@loomwood.shop \
//!   cargo test -p loomwood-integration-tests -- --ignored
//! ```
//!
//! All tests are `#[ignore]`d by default because they require the server
//! and content backend credentials. Tests that create documents use
//! uniquely-named records and clean up after themselves where they can.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the admin server (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// The email the test signs in with; must match the server's
/// `ADMIN_ALLOWED_EMAIL`.
///
/// # Panics
///
/// Panics if `ADMIN_ALLOWED_EMAIL` is not set.
#[must_use]
pub fn allowed_email() -> String {
    std::env::var("ADMIN_ALLOWED_EMAIL").expect("ADMIN_ALLOWED_EMAIL must be set for these tests")
}

/// Create a cookie-holding client and sign it in.
///
/// # Panics
///
/// Panics if the client cannot be built or the sign-in request fails.
pub async fn signed_in_client() -> Client {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client");

    let resp = client
        .post(format!("{}/auth/login", admin_base_url()))
        .form(&[("email", allowed_email())])
        .send()
        .await
        .expect("Failed to sign in");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    client
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
#[must_use]
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

//! HTTP route handlers for the admin dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (queries the backend)
//!
//! # Dashboard
//! GET  /                         - Document counts per type
//!
//! # Auth (single allowed email, session cookie)
//! GET  /auth/login               - Login page
//! POST /auth/login               - Sign in
//! POST /auth/logout              - Sign out (also drops the screen caches)
//!
//! # Messages (pin + delete; created by storefront visitors)
//! GET  /messages                 - Message list, pinned first
//! POST /messages/{id}/pin        - Toggle the pinned flag
//! POST /messages/{id}/delete     - Delete a message
//!
//! # Users
//! GET  /users                    - User list
//! POST /users                    - Create a user
//! POST /users/editor/new         - Open the add form
//! POST /users/editor/close       - Close the form
//! POST /users/{id}/edit          - Open the edit form for a user
//! POST /users/{id}               - Update a user
//! POST /users/{id}/delete        - Delete a user
//!
//! # Orders (status transition + delete; created by storefront checkout)
//! GET  /orders                   - Orders, pending then completed
//! POST /orders/{id}/complete     - One-way pending → completed
//! POST /orders/{id}/delete       - Delete an order
//!
//! # Products
//! GET  /products                 - Product grid
//! POST /products                 - Create a product (multipart, optional image)
//! POST /products/editor/new      - Open the add form
//! POST /products/editor/close    - Close the form
//! POST /products/{id}/edit       - Open the edit form for a product
//! POST /products/{id}            - Update a product (multipart, optional image)
//! POST /products/{id}/delete     - Delete a product
//! ```
//!
//! Every mutation redirects back to its screen; the screen then renders
//! from the reconciled in-memory list without refetching. `?reload=1`
//! forces a fresh query.

use askama::Template;
use axum::{
    Router,
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod messages;
pub mod orders;
pub mod products;
pub mod users;

/// Build the router for all dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Auth
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        // Messages
        .route("/messages", get(messages::index))
        .route("/messages/{id}/pin", post(messages::toggle_pin))
        .route("/messages/{id}/delete", post(messages::delete))
        // Users
        .route("/users", get(users::index).post(users::create))
        .route("/users/editor/new", post(users::open_create))
        .route("/users/editor/close", post(users::close_editor))
        .route("/users/{id}/edit", post(users::open_edit))
        .route("/users/{id}", post(users::update))
        .route("/users/{id}/delete", post(users::delete))
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/{id}/complete", post(orders::complete))
        .route("/orders/{id}/delete", post(orders::delete))
        // Products
        .route("/products", get(products::index).post(products::create))
        .route("/products/editor/new", post(products::open_create))
        .route("/products/editor/close", post(products::close_editor))
        .route("/products/{id}/edit", post(products::open_edit))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/delete", post(products::delete))
}

/// Query parameters shared by every screen's index page.
#[derive(Debug, Default, Deserialize)]
pub struct ScreenQuery {
    /// Force a fresh backend query instead of rendering the cache.
    pub reload: Option<String>,
    /// Flash error from a redirect.
    pub error: Option<String>,
    /// Flash notice from a redirect.
    pub notice: Option<String>,
}

impl ScreenQuery {
    /// Whether the screen should refetch even if already loaded.
    #[must_use]
    pub const fn wants_reload(&self) -> bool {
        self.reload.is_some()
    }

    /// Flash error text ("" when none).
    #[must_use]
    pub fn error_text(&self) -> String {
        self.error.clone().unwrap_or_default()
    }

    /// Flash notice text ("" when none).
    #[must_use]
    pub fn notice_text(&self) -> String {
        self.notice.clone().unwrap_or_default()
    }
}

/// Flash message kind carried on a redirect.
#[derive(Debug, Clone, Copy)]
pub enum Flash {
    Error,
    Notice,
}

/// Build a redirect back to a screen carrying a flash message.
pub(crate) fn flash_redirect(path: &str, kind: Flash, message: &str) -> Redirect {
    let param = match kind {
        Flash::Error => "error",
        Flash::Notice => "notice",
    };
    Redirect::to(&format!("{path}?{param}={}", urlencoding::encode(message)))
}

/// Render a template, degrading to a bare 500 body if rendering fails.
pub(crate) fn render_html<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

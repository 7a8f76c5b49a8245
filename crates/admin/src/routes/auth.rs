//! Login and logout handlers.
//!
//! Sign-in is a single email-string comparison against
//! `ADMIN_ALLOWED_EMAIL`. This is a gate for convenience, not a trust
//! boundary; the dashboard is expected to run on a private bind address.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::auth::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::{Flash, flash_redirect, render_html};

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: String,
}

/// Login page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
}

/// Login page handler.
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    let template = LoginTemplate {
        error: query.error.unwrap_or_default(),
    };
    render_html(&template)
}

/// Sign-in handler.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Redirect {
    let submitted = form.email.trim();
    let allowed = state.config().allowed_email.as_str();

    if !submitted.eq_ignore_ascii_case(allowed) {
        tracing::warn!("Rejected sign-in attempt");
        return flash_redirect(
            "/auth/login",
            Flash::Error,
            "That email is not allowed to sign in.",
        );
    }

    let admin = CurrentAdmin {
        email: submitted.to_string(),
    };
    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!("Failed to store session: {e}");
        return flash_redirect("/auth/login", Flash::Error, "Sign-in failed. Try again.");
    }

    tracing::info!("Admin signed in");
    Redirect::to("/")
}

/// Sign-out handler. Drops the screen caches so the next sign-in starts
/// from a fresh fetch.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    state.reset_screens().await;
    Redirect::to("/auth/login")
}

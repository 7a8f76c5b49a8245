//! Dashboard overview: document counts per type.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::filters;
use crate::middleware::auth::RequireAdminAuth;
use crate::sanity::SanityClient;
use crate::state::AppState;

use super::render_html;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_email: String,
    pub current_path: String,
    pub product_count: String,
    pub order_count: String,
    pub user_count: String,
    pub message_count: String,
}

/// Dashboard page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let sanity = state.sanity();

    let template = DashboardTemplate {
        admin_email: admin.email,
        current_path: "/".to_string(),
        product_count: count_display(sanity, "product").await,
        order_count: count_display(sanity, "order").await,
        user_count: count_display(sanity, "user").await,
        message_count: count_display(sanity, "message").await,
    };

    render_html(&template)
}

/// Fetch one type's count; a failed count renders as a dash rather than
/// failing the whole page.
async fn count_display(sanity: &SanityClient, doc_type: &str) -> String {
    match sanity.count(doc_type).await {
        Ok(n) => n.to_string(),
        Err(e) => {
            tracing::error!("Failed to count {doc_type} documents: {e}");
            "–".to_string()
        }
    }
}

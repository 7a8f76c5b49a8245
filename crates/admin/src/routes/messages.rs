//! Messages screen: list, pin/unpin, delete.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use axum::Form;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::middleware::auth::RequireAdminAuth;
use crate::sanity::queries;
use crate::sanity::types::{MessageDoc, MessagePatch};
use crate::state::AppState;

use super::{Flash, ScreenQuery, flash_redirect, render_html};

/// Message view for templates.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created: String,
    pub created_at: DateTime<Utc>,
    pub pinned: bool,
}

impl From<&MessageDoc> for MessageView {
    fn from(doc: &MessageDoc) -> Self {
        Self {
            id: doc.id.to_string(),
            name: doc.name.clone(),
            email: doc.email.clone(),
            body: doc.message.clone(),
            created: doc.created_at.format("%b %e, %Y %H:%M").to_string(),
            created_at: doc.created_at,
            pinned: doc.pinned,
        }
    }
}

/// Split messages into the pinned and unpinned partitions, each ordered
/// newest-first. Pinned messages always render above unpinned ones.
pub fn partition_messages(docs: &[MessageDoc]) -> (Vec<MessageView>, Vec<MessageView>) {
    let mut pinned: Vec<MessageView> = Vec::new();
    let mut others: Vec<MessageView> = Vec::new();

    for doc in docs {
        let view = MessageView::from(doc);
        if view.pinned {
            pinned.push(view);
        } else {
            others.push(view);
        }
    }

    pinned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    others.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    (pinned, others)
}

/// Messages list page template.
#[derive(Template)]
#[template(path = "messages/index.html")]
pub struct MessagesIndexTemplate {
    pub admin_email: String,
    pub current_path: String,
    pub error: String,
    pub notice: String,
    pub pinned: Vec<MessageView>,
    pub others: Vec<MessageView>,
}

/// Messages list page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
) -> Html<String> {
    let mut screen = state.screens().messages.write().await;

    if !screen.loaded || query.wants_reload() {
        match state
            .sanity()
            .query::<Vec<MessageDoc>>(queries::ALL_MESSAGES, &[])
            .await
        {
            Ok(docs) => {
                screen.store.replace_all(docs);
                screen.loaded = true;
            }
            Err(e) => {
                // Keep whatever list was displayed before
                tracing::error!("Failed to fetch messages: {e}");
            }
        }
    }

    let (pinned, others) = partition_messages(screen.store.items());

    let template = MessagesIndexTemplate {
        admin_email: admin.email,
        current_path: "/messages".to_string(),
        error: query.error_text(),
        notice: query.notice_text(),
        pinned,
        others,
    };

    render_html(&template)
}

/// Pin toggle form body: the flag's current value as rendered.
#[derive(Debug, Deserialize)]
pub struct PinForm {
    pub pinned: bool,
}

/// Toggle a message's pinned flag.
///
/// Patches the inverse of the value the admin was looking at; re-sorting
/// falls out of the pinned/unpinned partition at render time.
#[instrument(skip(_admin, state))]
pub async fn toggle_pin(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PinForm>,
) -> Redirect {
    let patch = MessagePatch {
        pinned: !form.pinned,
    };

    let updated: Result<MessageDoc, _> = state.sanity().patch(&id, &patch).await;
    match updated {
        Ok(doc) => {
            let mut screen = state.screens().messages.write().await;
            screen.store.apply_updated(doc);
            Redirect::to("/messages")
        }
        Err(e) => {
            tracing::error!("Failed to toggle pin on message {id}: {e}");
            flash_redirect(
                "/messages",
                Flash::Error,
                "Could not update the message. Nothing was changed.",
            )
        }
    }
}

/// Delete a message.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    match state.sanity().delete(&id).await {
        Ok(()) => {
            let mut screen = state.screens().messages.write().await;
            screen.store.remove(&id);
            flash_redirect("/messages", Flash::Notice, "Message deleted.")
        }
        Err(e) => {
            // The record stays in the list: stale but harmless
            tracing::error!("Failed to delete message {id}: {e}");
            flash_redirect(
                "/messages",
                Flash::Error,
                "Could not delete the message. It is still in the list.",
            )
        }
    }
}

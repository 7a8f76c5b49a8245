//! Users screen: list, create, edit, delete.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use axum::Form;
use tracing::instrument;

use crate::filters;
use crate::middleware::auth::RequireAdminAuth;
use crate::models::UserForm;
use crate::sanity::queries;
use crate::sanity::types::{PostalAddress, UserDoc};
use crate::state::AppState;

use super::{Flash, ScreenQuery, flash_redirect, render_html};

/// User view for templates.
#[derive(Debug, Clone)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub verified: bool,
    pub role: String,
    pub is_admin: bool,
    pub created: String,
}

impl From<&UserDoc> for UserView {
    fn from(doc: &UserDoc) -> Self {
        Self {
            id: doc.id.to_string(),
            name: doc.name.clone(),
            email: doc.email.clone(),
            phone: doc.phone.clone().unwrap_or_default(),
            address: doc
                .address
                .as_ref()
                .map(PostalAddress::display_line)
                .unwrap_or_default(),
            verified: doc.verified,
            role: doc.role.label().to_string(),
            is_admin: doc.role == loomwood_core::UserRole::Admin,
            created: doc.created_at.format("%b %e, %Y").to_string(),
        }
    }
}

/// Users list page template.
#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub admin_email: String,
    pub current_path: String,
    pub error: String,
    pub notice: String,
    pub users: Vec<UserView>,
    pub editor_open: bool,
    pub editor_is_edit: bool,
    pub editor_title: String,
    pub submit_path: String,
    pub form: UserForm,
}

/// Users list page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
) -> Html<String> {
    let mut screen = state.screens().users.write().await;

    if !screen.loaded || query.wants_reload() {
        match state
            .sanity()
            .query::<Vec<UserDoc>>(queries::ALL_USERS, &[])
            .await
        {
            Ok(docs) => {
                screen.store.replace_all(docs);
                screen.loaded = true;
            }
            Err(e) => {
                tracing::error!("Failed to fetch users: {e}");
            }
        }
    }

    let users: Vec<UserView> = screen.store.items().iter().map(UserView::from).collect();

    let editor = &screen.editor;
    let editor_is_edit = editor.editing_id().is_some();
    let submit_path = editor
        .editing_id()
        .map_or_else(|| "/users".to_string(), |id| format!("/users/{id}"));

    let template = UsersIndexTemplate {
        admin_email: admin.email,
        current_path: "/users".to_string(),
        error: query.error_text(),
        notice: query.notice_text(),
        users,
        editor_open: editor.is_open(),
        editor_is_edit,
        editor_title: if editor_is_edit {
            "Edit user".to_string()
        } else {
            "Add user".to_string()
        },
        submit_path,
        form: editor.buffer().cloned().unwrap_or_default(),
    };

    render_html(&template)
}

/// Open the add form with empty defaults.
#[instrument(skip(_admin, state))]
pub async fn open_create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Redirect {
    let mut screen = state.screens().users.write().await;
    screen.editor.open_create(UserForm::default());
    Redirect::to("/users")
}

/// Open the edit form prefilled from the cached record.
#[instrument(skip(_admin, state))]
pub async fn open_edit(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    let mut screen = state.screens().users.write().await;

    let Some(doc) = screen.store.get(&id) else {
        return flash_redirect("/users", Flash::Error, "That user is no longer in the list.");
    };

    let buffer = UserForm::from_doc(doc);
    screen.editor.open_edit(id, buffer);
    Redirect::to("/users")
}

/// Close the form without submitting.
#[instrument(skip(_admin, state))]
pub async fn close_editor(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Redirect {
    let mut screen = state.screens().users.write().await;
    screen.editor.close();
    Redirect::to("/users")
}

/// Create a user.
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> Redirect {
    // Validate before any network call
    let validated = match form.validate_new() {
        Ok(validated) => validated,
        Err(message) => {
            let mut screen = state.screens().users.write().await;
            screen.editor.open_create(form);
            return flash_redirect("/users", Flash::Error, &message);
        }
    };

    let created: Result<UserDoc, _> = state.sanity().create(&validated.into_new()).await;
    match created {
        Ok(doc) => {
            let mut screen = state.screens().users.write().await;
            screen.store.insert_created(doc);
            screen.editor.submit_succeeded();
            flash_redirect("/users", Flash::Notice, "User created.")
        }
        Err(e) => {
            tracing::error!("Failed to create user: {e}");
            let mut screen = state.screens().users.write().await;
            screen.editor.open_create(form);
            flash_redirect(
                "/users",
                Flash::Error,
                "Could not create the user. Nothing was saved.",
            )
        }
    }
}

/// Update a user.
#[instrument(skip(_admin, state, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> Redirect {
    let validated = match form.validate_update() {
        Ok(validated) => validated,
        Err(message) => {
            let mut screen = state.screens().users.write().await;
            screen.editor.open_edit(id, form);
            return flash_redirect("/users", Flash::Error, &message);
        }
    };

    let updated: Result<UserDoc, _> = state.sanity().patch(&id, &validated.into_patch()).await;
    match updated {
        Ok(doc) => {
            let mut screen = state.screens().users.write().await;
            screen.store.apply_updated(doc);
            screen.editor.submit_succeeded();
            flash_redirect("/users", Flash::Notice, "User updated.")
        }
        Err(e) => {
            // Local and remote can stay out of sync until the admin retries
            tracing::error!("Failed to update user {id}: {e}");
            let mut screen = state.screens().users.write().await;
            screen.editor.open_edit(id, form);
            flash_redirect(
                "/users",
                Flash::Error,
                "Could not save the user. Your changes are still in the form.",
            )
        }
    }
}

/// Delete a user.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    match state.sanity().delete(&id).await {
        Ok(()) => {
            let mut screen = state.screens().users.write().await;
            screen.store.remove(&id);
            flash_redirect("/users", Flash::Notice, "User deleted.")
        }
        Err(e) => {
            tracing::error!("Failed to delete user {id}: {e}");
            flash_redirect(
                "/users",
                Flash::Error,
                "Could not delete the user. They are still in the list.",
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_view_masks_nothing_but_password() {
        let doc: UserDoc = serde_json::from_value(serde_json::json!({
            "_id": "user-1",
            "_createdAt": "2026-01-02T18:04:11Z",
            "name": "Marta Oduya",
            "email": "marta@example.com",
            "password": "hunter2",
            "address": {"street": "44 Birch Ln", "city": "Salem", "zip": "97301"},
            "verified": true,
            "role": "admin",
        }))
        .unwrap();

        let view = UserView::from(&doc);
        assert_eq!(view.name, "Marta Oduya");
        assert_eq!(view.address, "44 Birch Ln, Salem, 97301");
        assert!(view.is_admin);
        // The view has no password field at all; templates can't leak it
    }
}

//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::components::{EditorState, ListStore};
use crate::config::AdminConfig;
use crate::models::{ProductForm, UserForm};
use crate::sanity::SanityClient;
use crate::sanity::types::{MessageDoc, OrderDoc, ProductDoc, UserDoc};

/// One screen's transient state: the reconciled list cache, the inline
/// editor, and whether the initial load has happened.
#[derive(Debug)]
pub struct Screen<T, B> {
    pub store: ListStore<T>,
    pub editor: EditorState<B>,
    pub loaded: bool,
}

impl<T, B> Screen<T, B> {
    /// A cold screen: empty list, closed editor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: ListStore::new(),
            editor: EditorState::Closed,
            loaded: false,
        }
    }
}

impl<T, B> Default for Screen<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-screen caches, one per record type.
///
/// Each screen's state is only touched by that screen's own handlers; the
/// locks exist for memory safety, not coordination. Mutations carry no
/// version checks, so overlapping edits resolve last-write-wins.
#[derive(Debug, Default)]
pub struct Screens {
    pub messages: RwLock<Screen<MessageDoc, ()>>,
    pub users: RwLock<Screen<UserDoc, UserForm>>,
    pub orders: RwLock<Screen<OrderDoc, ()>>,
    pub products: RwLock<Screen<ProductDoc, ProductForm>>,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the content backend client, and the screen caches.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    sanity: SanityClient,
    screens: Screens,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let sanity = SanityClient::new(&config.sanity);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                sanity,
                screens: Screens::default(),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the content backend client.
    #[must_use]
    pub fn sanity(&self) -> &SanityClient {
        &self.inner.sanity
    }

    /// Get a reference to the per-screen caches.
    #[must_use]
    pub fn screens(&self) -> &Screens {
        &self.inner.screens
    }

    /// Drop every screen cache back to cold (used on logout).
    pub async fn reset_screens(&self) {
        *self.inner.screens.messages.write().await = Screen::new();
        *self.inner.screens.users.write().await = Screen::new();
        *self.inner.screens.orders.write().await = Screen::new();
        *self.inner.screens.products.write().await = Screen::new();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::components::Keyed;

    #[tokio::test]
    async fn test_reset_screens_clears_caches() {
        let state = AppState::new(test_config());

        {
            let mut screen = state.screens().messages.write().await;
            screen.loaded = true;
            screen.store.replace_all(vec![sample_message()]);
        }

        state.reset_screens().await;

        let screen = state.screens().messages.read().await;
        assert!(!screen.loaded);
        assert!(screen.store.is_empty());
    }

    fn test_config() -> AdminConfig {
        use secrecy::SecretString;

        AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            allowed_email: loomwood_core::Email::parse("admin@loomwood.shop").unwrap(),
            sanity: crate::config::SanityConfig {
                project_id: "9x7k2p4q".to_string(),
                dataset: "test".to_string(),
                api_version: "2021-10-21".to_string(),
                token: SecretString::from("sk-test-token"),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    fn sample_message() -> MessageDoc {
        let doc: MessageDoc = serde_json::from_str(
            r#"{
                "_id": "message-1",
                "_createdAt": "2026-03-14T09:26:53Z",
                "name": "Ada",
                "email": "ada@example.com",
                "message": "Hello"
            }"#,
        )
        .unwrap();
        assert_eq!(doc.key(), "message-1");
        doc
    }
}

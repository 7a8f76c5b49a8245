//! Hosted content backend client.
//!
//! All four record types (products, users, orders, messages) live in a
//! hosted document store; this module is the only place that talks to it.
//!
//! # Architecture
//!
//! - [`SanityClient`] wraps the backend's HTTP API: GROQ queries, the
//!   mutation endpoint (create / patch / delete), and the asset upload
//!   endpoint
//! - Raw document types live in [`types`]; query text in [`queries`]
//! - The backend is treated as an opaque remote store with eventual
//!   read-after-write consistency; mutations carry no revision checks, so
//!   concurrent editors are last-write-wins
//!
//! # Example
//!
//! ```rust,ignore
//! use loomwood_admin::sanity::{SanityClient, queries};
//! use loomwood_admin::sanity::types::ProductDoc;
//!
//! let client = SanityClient::new(&config.sanity);
//!
//! // Fetch the full product list
//! let products: Vec<ProductDoc> = client.query(queries::ALL_PRODUCTS, &[]).await?;
//!
//! // Patch a single field
//! let updated: ProductDoc = client.patch(id, &serde_json::json!({"stock": 4})).await?;
//! ```

mod client;
pub mod image;
pub mod queries;
pub mod types;

pub use client::SanityClient;

use thiserror::Error;

/// Errors that can occur when interacting with the content backend.
#[derive(Debug, Error)]
pub enum SanityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned an error payload.
    #[error("API error: {}", format_api_error(.0))]
    Api(ApiError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// An error payload returned by the content backend.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Machine-readable error type (e.g. `queryParseError`), when present.
    pub kind: Option<String>,
    /// Human-readable description.
    pub description: String,
}

fn format_api_error(err: &ApiError) -> String {
    match &err.kind {
        Some(kind) => format!("{kind}: {}", err.description),
        None => err.description.clone(),
    }
}

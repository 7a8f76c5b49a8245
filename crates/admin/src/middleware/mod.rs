//! Middleware for the admin dashboard.

pub mod auth;
pub mod session;

pub use session::create_session_layer;

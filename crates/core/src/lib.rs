//! Loomwood Core - Shared types library.
//!
//! This crate provides common types used across all Loomwood components:
//! - `admin` - Internal administration dashboard
//! - `cli` - Command-line tools for seeding and exports
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe ids, emails, statuses, and
//!   money formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

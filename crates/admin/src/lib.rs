//! Loomwood Admin library.
//!
//! This crate provides the admin dashboard as a library, allowing it to be
//! tested and reused from the CLI.
//!
//! # Architecture
//!
//! - Axum web framework, Askama templates for server-side rendering
//! - All records live in a hosted content backend (see [`sanity`]); the
//!   process keeps a transient per-screen cache that is reconciled by id
//!   after each mutation instead of refetching
//! - Sessions are in-memory; the sign-in gate is a single configured email
//!
//! # Security
//!
//! The content backend token has full read/write access to the dataset.
//! Run this binary on a private bind address only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod sanity;
pub mod state;

//! # Users Service
//!
//! CRUD service for a single `users` table, exposed over HTTP.
//!
//! ## Features
//!
//! - **Listing**: paginated, ordered by id, with page metadata
//! - **CRUD**: get, create, full-overwrite update, delete by id
//! - **Lookups**: search by exact email, filter by state, count
//! - **Storage**: PostgreSQL through Diesel, or an in-memory store for tests
//! - **HTTP API**: axum router with Swagger UI
//!
//! ## Architecture
//!
//! - [`models`]: the user record, request body and pagination types
//! - [`db`]: repository trait, backends, factory and service layer
//! - [`config`]: listen address configuration
//! - `http`: axum handlers and router (feature `http-server`)

// RepositoryError carries an ErrorContext for debugging.
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;

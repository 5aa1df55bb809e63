//! HTTP server module.
//!
//! Exposes the user service as a REST API under `/api/User`, plus `/health`
//! and a Swagger UI at `/swagger`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query/path/body extraction                             │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error mapping                       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db/services.rs)                           │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

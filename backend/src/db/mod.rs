//! Database module for user storage.
//!
//! This module provides abstractions for database operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (http/) - /api/User endpoints               │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Page clamping and pagination metadata                │
//! │  - Server-assigned creation timestamps                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │                              │
//! ┌───▼──────────────┐   ┌───────────▼───────┐
//! │ Postgres (Diesel)│   │ Local (in-memory) │
//! └──────────────────┘   └───────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use users_service::db::{services, RepositoryFactory};
//! use users_service::models::PageRequest;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_runtime_config(None).await?;
//!     let page = services::list_users(repo.as_ref(), PageRequest::default()).await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

#[cfg(not(feature = "postgres-repo"))]
impl PostgresConfig {
    pub fn from_env() -> Result<Self, String> {
        Err("Postgres repository feature not enabled".to_string())
    }
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::{RepositoryConfig, REPOSITORY_CONFIG_ENV};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, UserRepository};

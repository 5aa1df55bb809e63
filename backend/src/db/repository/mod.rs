//! Repository trait definitions for database operations.
//!
//! - [`error`]: Error types for repository operations
//! - [`user`]: The [`UserRepository`] trait covering every statement the
//!   service issues against the `users` table

pub mod error;
pub mod user;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use user::UserRepository;

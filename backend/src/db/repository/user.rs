//! User repository trait.
//!
//! One method per statement the HTTP layer needs. Lookups that may miss
//! return `Option` and leave the "not found" wording to the service layer.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewUser, User, UserId, UserInput};

/// Repository trait for the `users` table.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait UserRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Reads ====================

    /// Count all rows.
    async fn count_users(&self) -> RepositoryResult<i64>;

    /// Fetch a window of rows ordered by id ascending.
    ///
    /// # Arguments
    /// * `offset` - Rows to skip
    /// * `limit` - Maximum rows to return
    async fn list_users(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<User>>;

    /// Look a user up by primary key.
    async fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>>;

    /// First user (lowest id) whose email equals `email` exactly.
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// All users whose state equals `state` exactly, ordered by id.
    async fn list_users_by_state(&self, state: &str) -> RepositoryResult<Vec<User>>;

    // ==================== Writes ====================

    /// Insert a user. The store assigns the id.
    async fn insert_user(&self, user: &NewUser) -> RepositoryResult<User>;

    /// Overwrite every mutable column of `id` with `input`.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The row after the update
    /// * `Ok(None)` - No such row; nothing was written
    async fn update_user(&self, id: UserId, input: &UserInput) -> RepositoryResult<Option<User>>;

    /// Delete `id`.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The row as it was before removal
    /// * `Ok(None)` - No such row
    async fn delete_user(&self, id: UserId) -> RepositoryResult<Option<User>>;
}

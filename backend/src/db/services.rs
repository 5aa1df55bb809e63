//! High-level database service layer.
//!
//! Repository-agnostic operations behind each endpoint. This is where the
//! rules that must hold regardless of storage backend live: page clamping,
//! server-side timestamps, and the wording of "not found" errors.
//!
//! # Usage
//!
//! ```no_run
//! use users_service::db::{services, repositories::LocalRepository};
//! use users_service::models::PageRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!
//!     let page = services::list_users(&repo, PageRequest::default()).await?;
//!     println!("Found {} users", page.pagination.total_users);
//!
//!     Ok(())
//! }
//! ```

use tracing::{debug, info};

use super::repository::{ErrorContext, RepositoryError, RepositoryResult, UserRepository};
use crate::models::{NewUser, PageRequest, PaginationMeta, User, UserId, UserInput, UserPage};

// ==================== Health & Connection ====================

/// Check if the database connection is healthy.
pub async fn health_check<R: UserRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

fn user_not_found(operation: &str, id: UserId) -> RepositoryError {
    RepositoryError::not_found(format!("User with ID {} not found", id))
        .with_context(ErrorContext::new(operation).for_user(id))
}

// ==================== Reads ====================

/// One page of users ordered by id, with pagination metadata.
///
/// The total is counted before the page is fetched; both are separate
/// statements, so a concurrent insert may show up in one and not the other.
pub async fn list_users<R: UserRepository + ?Sized>(
    repo: &R,
    request: PageRequest,
) -> RepositoryResult<UserPage> {
    let total_users = repo.count_users().await?;
    let data = repo.list_users(request.offset(), request.limit()).await?;
    debug!(
        page = request.page(),
        page_size = request.page_size(),
        returned = data.len(),
        total_users,
        "Listed users"
    );

    Ok(UserPage {
        data,
        pagination: PaginationMeta::new(request, total_users),
    })
}

/// Fetch one user.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` - "User with ID {id} not found"
pub async fn get_user<R: UserRepository + ?Sized>(repo: &R, id: UserId) -> RepositoryResult<User> {
    repo.get_user(id)
        .await?
        .ok_or_else(|| user_not_found("get_user", id))
}

/// First user with exactly this email.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` - "User with email {email} not found"
pub async fn find_user_by_email<R: UserRepository + ?Sized>(
    repo: &R,
    email: &str,
) -> RepositoryResult<User> {
    repo.find_user_by_email(email).await?.ok_or_else(|| {
        RepositoryError::not_found(format!("User with email {} not found", email))
            .with_operation("find_user_by_email")
    })
}

/// Every user in `state`. An unknown state yields an empty list.
pub async fn list_users_by_state<R: UserRepository + ?Sized>(
    repo: &R,
    state: &str,
) -> RepositoryResult<Vec<User>> {
    repo.list_users_by_state(state).await
}

/// Total number of users.
pub async fn count_users<R: UserRepository + ?Sized>(repo: &R) -> RepositoryResult<i64> {
    repo.count_users().await
}

// ==================== Writes ====================

/// Insert a user. The creation timestamp is taken from the server clock;
/// the store assigns the id.
pub async fn create_user<R: UserRepository + ?Sized>(
    repo: &R,
    input: UserInput,
) -> RepositoryResult<User> {
    let user = repo.insert_user(&NewUser::stamped_now(input)).await?;
    info!(user_id = %user.id, "Created user");
    Ok(user)
}

/// Overwrite every mutable field of `id` with `input`.
///
/// Fields absent from `input` are cleared. Nothing is written when the user
/// does not exist.
pub async fn update_user<R: UserRepository + ?Sized>(
    repo: &R,
    id: UserId,
    input: UserInput,
) -> RepositoryResult<User> {
    let user = repo
        .update_user(id, &input)
        .await?
        .ok_or_else(|| user_not_found("update_user", id))?;
    info!(user_id = %id, "Updated user");
    Ok(user)
}

/// Delete `id` and return the row as it was.
pub async fn delete_user<R: UserRepository + ?Sized>(
    repo: &R,
    id: UserId,
) -> RepositoryResult<User> {
    let user = repo
        .delete_user(id)
        .await?
        .ok_or_else(|| user_not_found("delete_user", id))?;
    info!(user_id = %id, "Deleted user");
    Ok(user)
}

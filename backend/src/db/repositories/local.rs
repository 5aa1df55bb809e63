//! In-memory local repository implementation.
//!
//! Rows live in a `BTreeMap` keyed by id, so iteration order is already the
//! id-ascending order the listing endpoints need. Suitable for unit tests and
//! local development.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::repository::{RepositoryError, RepositoryResult, UserRepository};
use crate::models::{NewUser, User, UserId, UserInput};

/// In-memory local repository.
///
/// # Example
/// ```
/// use users_service::db::repositories::LocalRepository;
/// use users_service::db::UserRepository;
/// use users_service::models::{NewUser, UserInput};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     repo.insert_user(&NewUser::stamped_now(UserInput::default())).await.unwrap();
///     assert_eq!(repo.count_users().await.unwrap(), 1);
/// });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    users: BTreeMap<UserId, User>,
    next_user_id: i32,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_user_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy, every operation other than `health_check` fails with
    /// a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Get the number of users stored.
    pub fn user_count(&self) -> usize {
        self.data.read().users.len()
    }

    /// Check if a user exists.
    pub fn has_user(&self, id: UserId) -> bool {
        self.data.read().users.contains_key(&id)
    }

    fn ensure_healthy(data: &LocalData) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection("Local repository marked unhealthy"))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn count_users(&self) -> RepositoryResult<i64> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;
        Ok(data.users.len() as i64)
    }

    async fn list_users(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<User>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(data
            .users
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;
        Ok(data.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;
        Ok(data
            .users
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn list_users_by_state(&self, state: &str) -> RepositoryResult<Vec<User>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;
        Ok(data
            .users
            .values()
            .filter(|u| u.state.as_deref() == Some(state))
            .cloned()
            .collect())
    }

    async fn insert_user(&self, user: &NewUser) -> RepositoryResult<User> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data)?;
        let id = UserId::new(data.next_user_id);
        data.next_user_id += 1;

        let stored = User::from_new(id, user.clone());
        data.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_user(&self, id: UserId, input: &UserInput) -> RepositoryResult<Option<User>> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data)?;
        Ok(data.users.get_mut(&id).map(|existing| {
            existing.apply(input.clone());
            existing.clone()
        }))
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data)?;
        Ok(data.users.remove(&id))
    }
}

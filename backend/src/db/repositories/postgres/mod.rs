//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Embedded schema migration on startup (creates the `users` table)
//! - Blocking Diesel calls run on tokio's blocking pool
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;
use tracing::{debug, info};

use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, UserRepository};
use crate::models::{NewUser, User, UserId, UserInput};

mod models;
mod schema;

use models::*;
use schema::users;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
    /// - `PG_POOL_MAX`: Maximum pool size (default: 10)
    /// - `PG_POOL_MIN`: Minimum pool size (default: 1)
    /// - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.max_pool_size);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.min_pool_size);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.connection_timeout_sec);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.idle_timeout_sec);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::from(e).with_context(
                    ErrorContext::new("create_pool")
                        .with_detail(format!("max_size={}", config.max_pool_size)),
                )
            })?;
        info!(max_size = config.max_pool_size, "Postgres connection pool created");

        {
            let mut conn = pool
                .get()
                .map_err(|e| RepositoryError::from(e).with_operation("run_migrations"))?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal(format!("Migration failed: {}", e))
                .with_operation("run_migrations")
        })?;
        info!(count = applied.len(), "Applied pending migrations");

        Ok(())
    }

    /// Check out a pooled connection and run `f` on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| RepositoryError::from(e).with_operation("get_connection"))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            RepositoryError::internal(format!("Task join error: {}", e))
                .with_operation("spawn_blocking")
        })?
    }
}

/// Convert a Diesel error, tagging it with the operation that raised it.
fn map_diesel_error(operation: &'static str) -> impl Fn(diesel::result::Error) -> RepositoryError {
    move |err| RepositoryError::from(err).with_operation(operation)
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error("health_check"))
        })
        .await
    }

    async fn count_users(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            users::table
                .count()
                .get_result::<i64>(conn)
                .map_err(map_diesel_error("count_users"))
        })
        .await
    }

    async fn list_users(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<User>> {
        debug!(offset, limit, "Loading user page");
        self.with_conn(move |conn| {
            let rows = users::table
                .order(users::id.asc())
                .offset(offset)
                .limit(limit)
                .select(UserRow::as_select())
                .load::<UserRow>(conn)
                .map_err(map_diesel_error("list_users"))?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.with_conn(move |conn| {
            let row = users::table
                .find(id.value())
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()
                .map_err(map_diesel_error("get_user"))?;
            Ok(row.map(User::from))
        })
        .await
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let row = users::table
                .filter(users::email.eq(&email))
                .order(users::id.asc())
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()
                .map_err(map_diesel_error("find_user_by_email"))?;
            Ok(row.map(User::from))
        })
        .await
    }

    async fn list_users_by_state(&self, state: &str) -> RepositoryResult<Vec<User>> {
        let state = state.to_string();
        self.with_conn(move |conn| {
            let rows = users::table
                .filter(users::state.eq(&state))
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(conn)
                .map_err(map_diesel_error("list_users_by_state"))?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn insert_user(&self, user: &NewUser) -> RepositoryResult<User> {
        let row = NewUserRow::from(user);
        self.with_conn(move |conn| {
            let inserted = diesel::insert_into(users::table)
                .values(&row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(conn)
                .map_err(map_diesel_error("insert_user"))?;
            Ok(User::from(inserted))
        })
        .await
    }

    async fn update_user(&self, id: UserId, input: &UserInput) -> RepositoryResult<Option<User>> {
        let changeset = UserChangeset::from(input.clone());
        self.with_conn(move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let updated = diesel::update(users::table.find(id.value()))
                    .set(&changeset)
                    .returning(UserRow::as_returning())
                    .get_result::<UserRow>(tx)
                    .optional()
                    .map_err(map_diesel_error("update_user"))?;
                Ok(updated.map(User::from))
            })
        })
        .await
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(users::table.find(id.value()))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(conn)
                .optional()
                .map_err(map_diesel_error("delete_user"))?;
            Ok(deleted.map(User::from))
        })
        .await
    }
}

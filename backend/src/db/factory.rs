//! Repository selection and construction.
//!
//! The backend comes from `repository.toml` when one is configured, otherwise
//! from `REPOSITORY_TYPE` / `DATABASE_URL`.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{RepositoryError, RepositoryResult, UserRepository};
use super::PostgresConfig;

/// Storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres through Diesel
    Postgres,
    /// In-memory
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Case-insensitive: `postgres`, `pg` or `local`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// `REPOSITORY_TYPE` if it parses; otherwise Postgres when a database URL
    /// is present, else Local.
    pub fn from_env() -> Self {
        if let Some(kind) = std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            return kind;
        }

        let has_url = ["DATABASE_URL", "PG_DATABASE_URL"]
            .iter()
            .any(|key| std::env::var_os(key).is_some());
        if has_url {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Builds the `Arc<dyn UserRepository>` the HTTP state holds.
pub struct RepositoryFactory;

impl RepositoryFactory {
    pub fn create_local() -> Arc<dyn UserRepository> {
        info!("Using in-memory local repository");
        Arc::new(LocalRepository::new())
    }

    /// Connect and migrate. Both block, so they run off the async workers.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(config: PostgresConfig) -> RepositoryResult<Arc<dyn UserRepository>> {
        let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        info!("Postgres repository ready");
        Ok(Arc::new(repo))
    }

    #[cfg(not(feature = "postgres-repo"))]
    pub async fn create_postgres(_config: PostgresConfig) -> RepositoryResult<Arc<dyn UserRepository>> {
        Err(RepositoryError::configuration(
            "Postgres repository feature not enabled",
        ))
    }

    /// Select from `REPOSITORY_TYPE` and the `PG_*` / `DATABASE_URL` variables.
    pub async fn from_env() -> RepositoryResult<Arc<dyn UserRepository>> {
        Self::build(RepositoryType::from_env(), || {
            PostgresConfig::from_env().map_err(RepositoryError::configuration)
        })
        .await
    }

    /// Select from a loaded `repository.toml`.
    pub async fn from_config(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn UserRepository>> {
        Self::build(config.repository_type()?, || config.postgres_config()).await
    }

    /// The file wins when there is one; env selection otherwise.
    pub async fn from_runtime_config(
        file: Option<&RepositoryConfig>,
    ) -> RepositoryResult<Arc<dyn UserRepository>> {
        match file {
            Some(config) => Self::from_config(config).await,
            None => Self::from_env().await,
        }
    }

    async fn build<F>(kind: RepositoryType, postgres: F) -> RepositoryResult<Arc<dyn UserRepository>>
    where
        F: FnOnce() -> RepositoryResult<PostgresConfig>,
    {
        match kind {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Postgres => Self::create_postgres(postgres()?).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!("local".parse(), Ok(RepositoryType::Local));
        assert_eq!("Pg".parse(), Ok(RepositoryType::Postgres));
        assert!("sqlite".parse::<RepositoryType>().is_err());
    }

    #[tokio::test]
    async fn test_local_file_builds_empty_repository() {
        let config: RepositoryConfig = "[repository]\ntype = \"local\"\n".parse().unwrap();
        let repo = RepositoryFactory::from_runtime_config(Some(&config))
            .await
            .unwrap();
        assert!(repo.health_check().await.unwrap());
        assert_eq!(repo.count_users().await.unwrap(), 0);
    }

    #[cfg(not(feature = "postgres-repo"))]
    #[tokio::test]
    async fn test_postgres_file_without_feature_fails() {
        let config: RepositoryConfig = r#"
[repository]
type = "postgres"

[postgres]
database_url = "postgres://localhost/users"
"#
        .parse()
        .unwrap();
        let result = RepositoryFactory::from_config(&config).await;
        assert!(matches!(result, Err(RepositoryError::Configuration { .. })));
    }

    #[cfg(feature = "postgres-repo")]
    #[tokio::test]
    async fn test_postgres_file_without_url_fails_before_connecting() {
        let config: RepositoryConfig = "[repository]\ntype = \"postgres\"\n".parse().unwrap();
        let result = RepositoryFactory::from_config(&config).await;
        assert!(matches!(result, Err(RepositoryError::Configuration { .. })));
    }
}

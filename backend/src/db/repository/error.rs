//! Error types for repository operations.
//!
//! Every error carries an [`ErrorContext`] naming the statement and the user
//! row it concerned, so a 500 in the logs can be traced back to a query.

use std::fmt;

use crate::models::UserId;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a repository error happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Statement name, e.g. `"insert_user"`
    pub operation: Option<String>,
    pub user_id: Option<UserId>,
    /// Free-form extra, e.g. the database error kind
    pub detail: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn for_user(mut self, id: UserId) -> Self {
        self.user_id = Some(id);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Renders as ` [op=get_user, user=4, ...]`, or nothing when empty.
impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(op) = &self.operation {
            parts.push(format!("op={op}"));
        }
        if let Some(id) = self.user_id {
            parts.push(format!("user={id}"));
        }
        if let Some(detail) = &self.detail {
            parts.push(detail.clone());
        }
        if parts.is_empty() {
            Ok(())
        } else {
            write!(f, " [{}]", parts.join(", "))
        }
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Pool checkout or database connection failed.
    #[error("Connection error: {message}{context}")]
    Connection {
        message: String,
        context: ErrorContext,
    },

    /// A statement was rejected by the database.
    #[error("Query error: {message}{context}")]
    Query {
        message: String,
        context: ErrorContext,
    },

    /// The addressed user does not exist. Displays only the message, which
    /// is what HTTP clients get to see.
    #[error("{message}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Bad or missing settings at startup.
    #[error("Configuration error: {message}{context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Migrations, task joins and other failures outside a statement.
    #[error("Internal error: {message}{context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Replace the context.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        *self.context_mut() = context;
        self
    }

    /// Tag the error with the statement that raised it, keeping the rest of
    /// the context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Connection { context, .. }
            | Self::Query { context, .. }
            | Self::NotFound { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Connection { context, .. }
            | Self::Query { context, .. }
            | Self::NotFound { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => context,
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::Error;

        match err {
            Error::NotFound => Self::not_found("Record not found"),
            Error::DatabaseError(kind, info) => Self::query(info.message())
                .with_context(ErrorContext::default().with_detail(format!("kind={kind:?}"))),
            Error::DeserializationError(e) => {
                Self::internal(format!("Could not decode row: {e}"))
            }
            other => Self::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::connection(err.to_string())
    }
}

//! Database-specific error types and conversions.

use flock_core::error::FlockError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity} {key}")]
    Conflict { entity: String, key: String },

    #[error("Refusing to remove the last administrator of group {group_id}")]
    LastAdministrator { group_id: String },
}

impl DbError {
    /// Classify a failed statement, recognising unique index violations.
    ///
    /// SurrealDB surfaces a `UNIQUE` index violation (`Error::IndexExists`
    /// in its core) only through the statement error text, rendered as
    /// "Database index `idx` already contains 'value', with record `..`".
    /// Anything else becomes [`DbError::Query`].
    pub(crate) fn from_statement(err: impl std::fmt::Display, entity: &str, key: &str) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            DbError::Conflict {
                entity: entity.into(),
                key: key.into(),
            }
        } else {
            DbError::Query(message)
        }
    }
}

impl From<DbError> for FlockError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => FlockError::NotFound { entity, id },
            DbError::Conflict { entity, key } => FlockError::Conflict { entity, key },
            DbError::LastAdministrator { .. } => FlockError::InvalidOperation {
                reason: err.to_string(),
            },
            other => FlockError::Database(other.to_string()),
        }
    }
}

//! Error types for the flock system.

use thiserror::Error;

/// A fanned-out sub-operation that failed during bulk bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectFailure {
    pub effect: EffectKind,
    pub username: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    AddAdministrator,
    AddSubscriber,
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::AddAdministrator => f.write_str("add_administrator"),
            EffectKind::AddSubscriber => f.write_str("add_subscriber"),
        }
    }
}

impl std::fmt::Display for EffectFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for {}: {}", self.effect, self.username, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum FlockError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Entity already exists: {entity} {key}")]
    Conflict { entity: String, key: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },

    #[error("{} of the bulk operation's effects failed", .failures.len())]
    AggregateFailure {
        failures: Vec<EffectFailure>,
        /// Usernames dropped before fan-out because they did not resolve.
        unresolved: Vec<String>,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by the outer boundary to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Unauthenticated,
    Forbidden,
    InvalidOperation,
    AggregateFailure,
    Internal,
}

impl FlockError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlockError::Validation { .. } => ErrorKind::Validation,
            FlockError::Conflict { .. } => ErrorKind::Conflict,
            FlockError::NotFound { .. } => ErrorKind::NotFound,
            FlockError::Unauthenticated => ErrorKind::Unauthenticated,
            FlockError::Forbidden { .. } => ErrorKind::Forbidden,
            FlockError::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            FlockError::AggregateFailure { .. } => ErrorKind::AggregateFailure,
            FlockError::Database(_) | FlockError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FlockError::NotFound { .. })
    }
}

pub type FlockResult<T> = Result<T, FlockError>;

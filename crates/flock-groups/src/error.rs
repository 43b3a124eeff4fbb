//! Group administration error types.

use flock_core::error::FlockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroupError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("anonymous actors may not update groups")]
    AnonymousActor,

    #[error("actor is not an administrator of group {group}")]
    NotAdministrator { group: String },

    #[error("only privileged callers may bootstrap groups")]
    NotPrivileged,

    #[error("cannot remove the last administrator of group {group}")]
    LastAdministrator { group: String },

    #[error("none of the requested administrators could be resolved")]
    NoResolvableAdministrators { unresolved: Vec<String> },

    #[error("missing required attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("invalid username {username:?}: {reason}")]
    InvalidUsername { username: String, reason: String },

    #[error("invalid screen name: {0}")]
    InvalidScreenName(String),

    #[error("description is longer than {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("username {0:?} is already taken")]
    UsernameTaken(String),
}

impl From<GroupError> for FlockError {
    fn from(err: GroupError) -> Self {
        match err {
            GroupError::Unauthenticated => FlockError::Unauthenticated,
            GroupError::AnonymousActor
            | GroupError::NotAdministrator { .. }
            | GroupError::NotPrivileged => FlockError::Forbidden {
                reason: err.to_string(),
            },
            GroupError::LastAdministrator { .. } => FlockError::InvalidOperation {
                reason: err.to_string(),
            },
            GroupError::UsernameTaken(key) => FlockError::Conflict {
                entity: "username".into(),
                key,
            },
            GroupError::NoResolvableAdministrators { .. }
            | GroupError::MissingAttribute(_)
            | GroupError::InvalidUsername { .. }
            | GroupError::InvalidScreenName(_)
            | GroupError::DescriptionTooLong { .. } => FlockError::Validation {
                message: err.to_string(),
            },
        }
    }
}

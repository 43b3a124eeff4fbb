//! The party on whose behalf an operation runs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// No authenticated identity.
    Anonymous,
    /// An authenticated end user.
    User(Uuid),
    /// A trusted internal caller (bulk bootstrap, back-office tooling).
    /// Carries no user identity, so it is never a group administrator.
    Privileged,
}

impl Actor {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Actor::User(id) => Some(*id),
            Actor::Anonymous | Actor::Privileged => None,
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, Actor::Privileged)
    }
}

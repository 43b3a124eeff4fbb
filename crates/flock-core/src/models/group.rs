//! Group domain model.
//!
//! A group always has at least one administrator. There is no separate
//! owner field: the first entry of `administrators` is the account the
//! group was created for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub username: String,
    pub screen_name: String,
    pub description: String,
    pub is_private: bool,
    /// Insertion-ordered and duplicate-free. Never empty.
    pub administrators: Vec<Uuid>,
    /// Insertion-ordered and duplicate-free.
    pub subscribers: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn is_administrator(&self, user_id: Uuid) -> bool {
        self.administrators.contains(&user_id)
    }

    pub fn is_subscriber(&self, user_id: Uuid) -> bool {
        self.subscribers.contains(&user_id)
    }

    /// The administrator the group was created for.
    pub fn creator(&self) -> Option<Uuid> {
        self.administrators.first().copied()
    }

    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot::from(self)
    }
}

/// Gateway input for atomic group creation.
///
/// `first_administrator` is mandatory, so a group can only come into
/// existence already owned. It is recorded as both the sole
/// administrator and the sole subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub username: String,
    pub screen_name: String,
    pub description: String,
    pub is_private: bool,
    pub first_administrator: Uuid,
}

/// Partial update of mutable group attributes. `None` leaves the field
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub screen_name: Option<String>,
    pub description: Option<String>,
}

impl GroupPatch {
    pub fn is_empty(&self) -> bool {
        self.screen_name.is_none() && self.description.is_none()
    }
}

/// Attributes a user may supply when creating a group for themselves.
/// Anything else in the request is dropped by the boundary layer before
/// this struct is built.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GroupAttributes {
    pub username: Option<String>,
    pub screen_name: Option<String>,
    pub description: Option<String>,
}

/// Privileged creation of a group with several initial administrators.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BootstrapRequest {
    pub username: String,
    pub screen_name: Option<String>,
    pub is_private: bool,
    /// Order defines precedence: the first one that resolves owns the group.
    pub administrators: Vec<String>,
}

/// Reference to an existing group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRef {
    Id(Uuid),
    Username(String),
}

impl std::fmt::Display for GroupRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupRef::Id(id) => write!(f, "{id}"),
            GroupRef::Username(username) => write!(f, "username={username}"),
        }
    }
}

impl From<Uuid> for GroupRef {
    fn from(id: Uuid) -> Self {
        GroupRef::Id(id)
    }
}

impl From<&str> for GroupRef {
    fn from(username: &str) -> Self {
        GroupRef::Username(username.to_string())
    }
}

/// Read-only view of a group handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub id: Uuid,
    pub username: String,
    pub screen_name: String,
    pub description: String,
    pub is_private: bool,
    pub administrators: Vec<Uuid>,
    pub subscribers: Vec<Uuid>,
}

impl From<&Group> for GroupSnapshot {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            username: group.username.clone(),
            screen_name: group.screen_name.clone(),
            description: group.description.clone(),
            is_private: group.is_private,
            administrators: group.administrators.clone(),
            subscribers: group.subscribers.clone(),
        }
    }
}

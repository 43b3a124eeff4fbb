//! Permission checks for mutating an existing group.
//!
//! An actor may update a group iff it is a recorded administrator of
//! that group. Anonymous and privileged actors carry no user identity
//! and are therefore never administrators.

use flock_core::models::actor::Actor;
use flock_core::models::group::Group;

use crate::error::GroupError;

pub fn can_update(actor: &Actor, group: &Group) -> bool {
    actor
        .user_id()
        .is_some_and(|user_id| group.is_administrator(user_id))
}

/// Like [`can_update`], but reports the denial as an error.
pub fn ensure_can_update(actor: &Actor, group: &Group) -> Result<(), GroupError> {
    match actor {
        Actor::Anonymous => Err(GroupError::AnonymousActor),
        _ if can_update(actor, group) => Ok(()),
        _ => Err(GroupError::NotAdministrator {
            group: group.username.clone(),
        }),
    }
}

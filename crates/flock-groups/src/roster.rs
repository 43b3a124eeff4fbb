//! Administrator promotion and demotion.

use flock_core::error::FlockResult;
use flock_core::models::actor::Actor;
use flock_core::models::group::{Group, GroupRef};
use flock_core::repository::{GroupRepository, UserRepository};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::GroupError;
use crate::identity::IdentityLookup;
use crate::lifecycle::find_group;
use crate::permission;

#[derive(Clone)]
pub struct AdministratorRoster<U, G> {
    identity: IdentityLookup<U>,
    groups: G,
}

impl<U, G> AdministratorRoster<U, G>
where
    U: UserRepository + Clone + 'static,
    G: GroupRepository,
{
    pub fn new(identity: IdentityLookup<U>, groups: G) -> Self {
        Self { identity, groups }
    }

    /// Make `username` an administrator of `group`. Promoting an
    /// existing administrator succeeds without change.
    pub async fn promote(&self, actor: &Actor, group: &GroupRef, username: &str) -> FlockResult<()> {
        let (group, user_id) = self.authorize(actor, group, username).await?;

        if group.is_administrator(user_id) {
            debug!(group_id = %group.id, %username, "Already an administrator");
            return Ok(());
        }

        self.groups.add_administrator(group.id, user_id).await?;
        info!(group_id = %group.id, %username, "Administrator added");
        Ok(())
    }

    /// Remove `username` from the administrators of `group`. Demoting a
    /// non-administrator succeeds without change; demoting the last
    /// administrator fails with `InvalidOperation`.
    pub async fn demote(&self, actor: &Actor, group: &GroupRef, username: &str) -> FlockResult<()> {
        let (group, user_id) = self.authorize(actor, group, username).await?;

        if !group.is_administrator(user_id) {
            debug!(group_id = %group.id, %username, "Not an administrator");
            return Ok(());
        }
        if group.administrators.len() == 1 {
            return Err(GroupError::LastAdministrator {
                group: group.username,
            }
            .into());
        }

        // The gateway re-checks atomically in case of a concurrent demote.
        self.groups.remove_administrator(group.id, user_id).await?;
        info!(group_id = %group.id, %username, "Administrator removed");
        Ok(())
    }

    pub async fn administrators(&self, group: &GroupRef) -> FlockResult<Vec<Uuid>> {
        Ok(find_group(&self.groups, group).await?.administrators)
    }

    /// Load the group, check the actor may update it, then resolve the
    /// target user. Nothing is mutated before all three succeed.
    async fn authorize(
        &self,
        actor: &Actor,
        group: &GroupRef,
        username: &str,
    ) -> FlockResult<(Group, Uuid)> {
        let group = find_group(&self.groups, group).await?;
        permission::ensure_can_update(actor, &group)?;
        let user = self.identity.resolve(username).await?;
        Ok((group, user.id))
    }
}

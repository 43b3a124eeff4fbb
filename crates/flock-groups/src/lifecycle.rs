//! Group creation and attribute updates.
//!
//! A group comes into existence through a single gateway call that
//! already records its first administrator, so no caller can observe a
//! group without one.

use flock_core::error::FlockResult;
use flock_core::models::actor::Actor;
use flock_core::models::group::{Group, GroupAttributes, GroupPatch, GroupRef, NewGroup};
use flock_core::repository::{GroupRepository, UserRepository};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::GroupsConfig;
use crate::error::GroupError;
use crate::permission;
use crate::validation::{
    canonical_username, normalize_screen_name, normalize_username, validate_description,
};

#[derive(Clone)]
pub struct GroupLifecycle<U, G> {
    users: U,
    groups: G,
    config: GroupsConfig,
}

impl<U: UserRepository, G: GroupRepository> GroupLifecycle<U, G> {
    pub fn new(users: U, groups: G, config: GroupsConfig) -> Self {
        Self {
            users,
            groups,
            config,
        }
    }

    /// Create a public group owned by the acting user, who becomes its
    /// sole administrator and sole subscriber.
    pub async fn create_self_service(
        &self,
        actor: &Actor,
        attrs: GroupAttributes,
    ) -> FlockResult<Group> {
        let owner = actor.user_id().ok_or(GroupError::Unauthenticated)?;

        let raw_username = attrs
            .username
            .ok_or(GroupError::MissingAttribute("username"))?;
        let new_group = self.prepare(
            &raw_username,
            attrs.screen_name,
            attrs.description,
            false,
            owner,
        )?;

        self.create_owned(new_group).await
    }

    /// Validate attributes and assemble the gateway input for a group
    /// owned by `owner`. Missing screen names default to the username.
    pub(crate) fn prepare(
        &self,
        raw_username: &str,
        screen_name: Option<String>,
        description: Option<String>,
        is_private: bool,
        owner: Uuid,
    ) -> Result<NewGroup, GroupError> {
        let username = normalize_username(raw_username, &self.config)?;
        let screen_name = normalize_screen_name(
            screen_name.as_deref().unwrap_or(&username),
            &self.config,
        )?;
        let description = description.unwrap_or_default();
        validate_description(&description, &self.config)?;

        Ok(NewGroup {
            username,
            screen_name,
            description,
            is_private,
            first_administrator: owner,
        })
    }

    /// Atomic creation path shared by self-service and bootstrap.
    pub(crate) async fn create_owned(&self, new_group: NewGroup) -> FlockResult<Group> {
        self.ensure_username_available(&new_group.username).await?;

        let group = self.groups.create(new_group).await?;
        info!(
            group_id = %group.id,
            username = %group.username,
            "Group created"
        );
        Ok(group)
    }

    /// Group usernames share the account namespace with users.
    async fn ensure_username_available(&self, username: &str) -> FlockResult<()> {
        match self.groups.get_by_username(username).await {
            Ok(_) => return Err(GroupError::UsernameTaken(username.to_string()).into()),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }
        match self.users.get_by_username(username).await {
            Ok(_) => Err(GroupError::UsernameTaken(username.to_string()).into()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err),
        }
    }

    pub async fn get(&self, group: &GroupRef) -> FlockResult<Group> {
        find_group(&self.groups, group).await
    }

    /// Update screen name and/or description on behalf of `actor`, who
    /// must administer the group.
    pub async fn update_attributes(
        &self,
        actor: &Actor,
        group: &GroupRef,
        patch: GroupPatch,
    ) -> FlockResult<Group> {
        let current = self.get(group).await?;
        permission::ensure_can_update(actor, &current)?;
        self.apply_patch(&current, patch).await
    }

    /// Apply a patch to a group the caller has already authorised for.
    pub async fn apply_patch(&self, group: &Group, mut patch: GroupPatch) -> FlockResult<Group> {
        if let Some(screen_name) = patch.screen_name.take() {
            patch.screen_name = Some(normalize_screen_name(&screen_name, &self.config)?);
        }
        if let Some(description) = &patch.description {
            validate_description(description, &self.config)?;
        }
        if patch.is_empty() {
            debug!(group_id = %group.id, "Empty patch, nothing to update");
            return Ok(group.clone());
        }

        let updated = self.groups.update(group.id, patch).await?;
        info!(group_id = %updated.id, "Group attributes updated");
        Ok(updated)
    }
}

pub(crate) async fn find_group<G: GroupRepository>(
    groups: &G,
    group: &GroupRef,
) -> FlockResult<Group> {
    match group {
        GroupRef::Id(id) => groups.get_by_id(*id).await,
        GroupRef::Username(username) => {
            groups
                .get_by_username(&canonical_username(username))
                .await
        }
    }
}

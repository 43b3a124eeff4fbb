//! Entry point for the outer boundary: one object exposing every group
//! administration operation over a single pair of repositories.

use flock_core::error::FlockResult;
use flock_core::models::actor::Actor;
use flock_core::models::group::{BootstrapRequest, Group, GroupAttributes, GroupPatch, GroupRef};
use flock_core::repository::{GroupRepository, UserRepository};
use uuid::Uuid;

use crate::bootstrap::{BootstrapCoordinator, BootstrapOutcome};
use crate::config::GroupsConfig;
use crate::identity::IdentityLookup;
use crate::lifecycle::GroupLifecycle;
use crate::roster::AdministratorRoster;

/// Group administration service.
///
/// Generic over repository implementations so that this crate has no
/// dependency on the database crate.
#[derive(Clone)]
pub struct GroupsService<U, G> {
    lifecycle: GroupLifecycle<U, G>,
    roster: AdministratorRoster<U, G>,
    bootstrap: BootstrapCoordinator<U, G>,
}

impl<U, G> GroupsService<U, G>
where
    U: UserRepository + Clone + 'static,
    G: GroupRepository + Clone + 'static,
{
    pub fn new(users: U, groups: G, config: GroupsConfig) -> Self {
        let identity = IdentityLookup::new(users.clone());
        let lifecycle = GroupLifecycle::new(users, groups.clone(), config);
        Self {
            roster: AdministratorRoster::new(identity.clone(), groups.clone()),
            bootstrap: BootstrapCoordinator::new(identity, lifecycle.clone(), groups),
            lifecycle,
        }
    }

    pub async fn create(&self, actor: &Actor, attrs: GroupAttributes) -> FlockResult<Group> {
        self.lifecycle.create_self_service(actor, attrs).await
    }

    pub async fn bootstrap(
        &self,
        actor: &Actor,
        request: BootstrapRequest,
    ) -> FlockResult<BootstrapOutcome> {
        self.bootstrap.bootstrap(actor, request).await
    }

    pub async fn get(&self, group: &GroupRef) -> FlockResult<Group> {
        self.lifecycle.get(group).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        group: &GroupRef,
        patch: GroupPatch,
    ) -> FlockResult<Group> {
        self.lifecycle.update_attributes(actor, group, patch).await
    }

    pub async fn promote(&self, actor: &Actor, group: &GroupRef, username: &str) -> FlockResult<()> {
        self.roster.promote(actor, group, username).await
    }

    pub async fn demote(&self, actor: &Actor, group: &GroupRef, username: &str) -> FlockResult<()> {
        self.roster.demote(actor, group, username).await
    }

    pub async fn administrators(&self, group: &GroupRef) -> FlockResult<Vec<Uuid>> {
        self.roster.administrators(group).await
    }
}

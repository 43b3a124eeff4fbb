//! Privileged creation of a group with several initial administrators.
//!
//! The first administrator that resolves owns the group and is recorded
//! by the atomic creation call. Only then are the remaining
//! administrators promoted and subscribed, each effect in its own task.
//! Every effect is attempted and awaited regardless of how its siblings
//! fare, and all failures are reported together.
//!
//! Effects are not rolled back. If the caller drops the future while
//! effects are in flight, the tasks are aborted but whatever already
//! reached the gateway stays applied.

use std::collections::HashMap;

use flock_core::error::{EffectFailure, EffectKind, FlockError, FlockResult};
use flock_core::models::actor::Actor;
use flock_core::models::group::{BootstrapRequest, Group};
use flock_core::models::user::User;
use flock_core::repository::{GroupRepository, UserRepository};
use tokio::task::{self, JoinSet};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::GroupError;
use crate::identity::IdentityLookup;
use crate::lifecycle::GroupLifecycle;

/// Successful bootstrap result.
#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    /// The group as stored after every effect completed.
    pub group: Group,
    /// Requested administrators that did not resolve and were skipped.
    pub unresolved: Vec<String>,
}

#[derive(Clone)]
pub struct BootstrapCoordinator<U, G> {
    identity: IdentityLookup<U>,
    lifecycle: GroupLifecycle<U, G>,
    groups: G,
}

impl<U, G> BootstrapCoordinator<U, G>
where
    U: UserRepository + Clone + 'static,
    G: GroupRepository + Clone + 'static,
{
    pub fn new(identity: IdentityLookup<U>, lifecycle: GroupLifecycle<U, G>, groups: G) -> Self {
        Self {
            identity,
            lifecycle,
            groups,
        }
    }

    pub async fn bootstrap(
        &self,
        actor: &Actor,
        request: BootstrapRequest,
    ) -> FlockResult<BootstrapOutcome> {
        if !actor.is_privileged() {
            return Err(GroupError::NotPrivileged.into());
        }

        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for resolution in self.identity.resolve_many(&request.administrators).await {
            match resolution.user {
                Some(user) => resolved.push(user),
                None => unresolved.push(resolution.username),
            }
        }
        if !unresolved.is_empty() {
            warn!(?unresolved, "Skipping administrators that did not resolve");
        }

        let Some((owner, co_admins)) = resolved.split_first() else {
            return Err(GroupError::NoResolvableAdministrators { unresolved }.into());
        };

        let new_group = self.lifecycle.prepare(
            &request.username,
            request.screen_name,
            None,
            request.is_private,
            owner.id,
        )?;
        let group = self.lifecycle.create_owned(new_group).await?;

        let failures = self.fan_out(group.id, co_admins).await;
        if !failures.is_empty() {
            return Err(FlockError::AggregateFailure {
                failures,
                unresolved,
            });
        }

        let group = self.groups.get_by_id(group.id).await?;
        info!(
            group_id = %group.id,
            administrators = group.administrators.len(),
            "Group bootstrapped"
        );
        Ok(BootstrapOutcome { group, unresolved })
    }

    /// Promote and subscribe every co-administrator concurrently and
    /// wait for all effects to settle.
    async fn fan_out(&self, group_id: Uuid, co_admins: &[User]) -> Vec<EffectFailure> {
        let mut effects = JoinSet::new();
        let mut labels: HashMap<task::Id, (EffectKind, String)> = HashMap::new();

        for user in co_admins {
            for kind in [EffectKind::AddAdministrator, EffectKind::AddSubscriber] {
                let groups = self.groups.clone();
                let user_id = user.id;
                let handle = effects.spawn(async move {
                    match kind {
                        EffectKind::AddAdministrator => {
                            groups.add_administrator(group_id, user_id).await
                        }
                        EffectKind::AddSubscriber => groups.add_subscriber(group_id, user_id).await,
                    }
                });
                labels.insert(handle.id(), (kind, user.username.clone()));
            }
        }

        let mut failures = Vec::new();
        while let Some(joined) = effects.join_next_with_id().await {
            let (id, reason) = match joined {
                Ok((_, Ok(()))) => continue,
                Ok((id, Err(err))) => (id, err.to_string()),
                Err(err) => (err.id(), err.to_string()),
            };
            let Some((effect, username)) = labels.remove(&id) else {
                continue;
            };
            warn!(%group_id, %effect, %username, %reason, "Bootstrap effect failed");
            failures.push(EffectFailure {
                effect,
                username,
                reason,
            });
        }
        failures
    }
}

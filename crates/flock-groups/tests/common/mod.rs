//! Shared fixtures for group administration integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use flock_core::error::{FlockError, FlockResult};
use flock_core::models::group::{Group, GroupPatch, NewGroup};
use flock_core::models::user::{CreateUser, User};
use flock_core::repository::{GroupRepository, UserRepository};
use flock_db::repository::{SurrealGroupRepository, SurrealUserRepository};
use flock_groups::{GroupsConfig, GroupsService};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tokio::sync::Notify;
use uuid::Uuid;

pub type Users = SurrealUserRepository<Db>;
pub type Groups = SurrealGroupRepository<Db>;

/// Spin up an in-memory DB, run migrations and create one user per name.
pub async fn setup(usernames: &[&str]) -> (Users, Groups, Vec<User>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    flock_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let mut created = Vec::new();
    for username in usernames {
        let user = users
            .create(CreateUser {
                username: (*username).into(),
                screen_name: None,
            })
            .await
            .unwrap();
        created.push(user);
    }

    (users, SurrealGroupRepository::new(db), created)
}

pub fn service<G>(users: Users, groups: G) -> GroupsService<Users, G>
where
    G: GroupRepository + Clone + 'static,
{
    GroupsService::new(users, groups, GroupsConfig::default())
}

/// Group repository wrapper that injects failures into subscriber
/// effects and delegates everything else.
#[derive(Clone)]
pub struct FaultyGroups<G> {
    inner: G,
    failing_subscribers: Arc<HashSet<Uuid>>,
    stall_subscribers: bool,
    pub promoted: Arc<Notify>,
}

impl<G: GroupRepository> FaultyGroups<G> {
    /// `add_subscriber` fails for each of `users`.
    pub fn failing_subscribe(inner: G, users: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            inner,
            failing_subscribers: Arc::new(users.into_iter().collect()),
            stall_subscribers: false,
            promoted: Arc::new(Notify::new()),
        }
    }

    /// `add_subscriber` never completes.
    pub fn stalled_subscribe(inner: G) -> Self {
        Self {
            inner,
            failing_subscribers: Arc::default(),
            stall_subscribers: true,
            promoted: Arc::new(Notify::new()),
        }
    }
}

impl<G: GroupRepository> GroupRepository for FaultyGroups<G> {
    async fn create(&self, input: NewGroup) -> FlockResult<Group> {
        self.inner.create(input).await
    }

    async fn get_by_id(&self, id: Uuid) -> FlockResult<Group> {
        self.inner.get_by_id(id).await
    }

    async fn get_by_username(&self, username: &str) -> FlockResult<Group> {
        self.inner.get_by_username(username).await
    }

    async fn update(&self, id: Uuid, patch: GroupPatch) -> FlockResult<Group> {
        self.inner.update(id, patch).await
    }

    async fn add_administrator(&self, group_id: Uuid, user_id: Uuid) -> FlockResult<()> {
        let result = self.inner.add_administrator(group_id, user_id).await;
        self.promoted.notify_one();
        result
    }

    async fn remove_administrator(&self, group_id: Uuid, user_id: Uuid) -> FlockResult<()> {
        self.inner.remove_administrator(group_id, user_id).await
    }

    async fn add_subscriber(&self, group_id: Uuid, user_id: Uuid) -> FlockResult<()> {
        if self.stall_subscribers {
            std::future::pending::<()>().await;
        }
        if self.failing_subscribers.contains(&user_id) {
            return Err(FlockError::Database("injected subscribe failure".into()));
        }
        self.inner.add_subscriber(group_id, user_id).await
    }
}

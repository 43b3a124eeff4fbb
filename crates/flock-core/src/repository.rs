//! Persistence gateway trait definitions.
//!
//! All operations are async. Each single-entity mutation is atomic at
//! the gateway; nothing here spans a transaction over several records.
//! Lookups report a missing record as [`FlockError::NotFound`].
//!
//! [`FlockError::NotFound`]: crate::error::FlockError::NotFound

use uuid::Uuid;

use crate::error::FlockResult;
use crate::models::{
    group::{Group, GroupPatch, NewGroup},
    user::{CreateUser, User},
};

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = FlockResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FlockResult<User>> + Send;
    fn get_by_username(&self, username: &str) -> impl Future<Output = FlockResult<User>> + Send;
}

pub trait GroupRepository: Send + Sync {
    /// Create a group already owned by `input.first_administrator`, who
    /// becomes its sole administrator and sole subscriber.
    ///
    /// Fails with `Conflict` when the username is taken.
    fn create(&self, input: NewGroup) -> impl Future<Output = FlockResult<Group>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FlockResult<Group>> + Send;
    fn get_by_username(&self, username: &str)
    -> impl Future<Output = FlockResult<Group>> + Send;

    /// Apply a partial attribute update and return the updated group.
    fn update(
        &self,
        id: Uuid,
        patch: GroupPatch,
    ) -> impl Future<Output = FlockResult<Group>> + Send;

    /// Idempotent: adding an existing administrator is a no-op.
    fn add_administrator(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = FlockResult<()>> + Send;

    /// Idempotent for non-administrators. Fails with `InvalidOperation`
    /// instead of removing the final administrator.
    fn remove_administrator(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = FlockResult<()>> + Send;

    /// Idempotent: subscribing an existing subscriber is a no-op.
    fn add_subscriber(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = FlockResult<()>> + Send;
}

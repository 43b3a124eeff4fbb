//! SurrealDB implementations of the persistence gateway.

mod group;
mod user;

pub use group::SurrealGroupRepository;
pub use user::SurrealUserRepository;

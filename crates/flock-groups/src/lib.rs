//! Flock Groups — group administration and membership consistency.
//!
//! Components, leaf first:
//! - [`IdentityLookup`] resolves usernames to users, singly or in batch.
//! - [`permission`] decides whether an actor may mutate a group.
//! - [`GroupLifecycle`] creates groups and applies attribute updates.
//! - [`AdministratorRoster`] promotes and demotes administrators.
//! - [`BootstrapCoordinator`] creates a group with several initial
//!   administrators.
//!
//! [`GroupsService`] wires them together over one pair of repositories.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod permission;
pub mod roster;
pub mod service;
pub mod validation;

pub use bootstrap::{BootstrapCoordinator, BootstrapOutcome};
pub use config::GroupsConfig;
pub use error::GroupError;
pub use identity::{IdentityLookup, Resolution};
pub use lifecycle::GroupLifecycle;
pub use roster::AdministratorRoster;
pub use service::GroupsService;

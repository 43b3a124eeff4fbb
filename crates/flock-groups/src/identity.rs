//! Username to user resolution.

use flock_core::error::FlockResult;
use flock_core::models::user::User;
use flock_core::repository::UserRepository;
use tokio::task::JoinSet;
use tracing::warn;

use crate::validation::canonical_username;

/// Outcome of resolving one username in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub username: String,
    /// `None` when the username is unknown or the lookup failed.
    pub user: Option<User>,
}

#[derive(Clone)]
pub struct IdentityLookup<U> {
    users: U,
}

impl<U: UserRepository + Clone + 'static> IdentityLookup<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Resolve a single username; an unknown name is `NotFound`.
    /// Lookups are case-insensitive and ignore surrounding whitespace.
    pub async fn resolve(&self, username: &str) -> FlockResult<User> {
        self.users
            .get_by_username(&canonical_username(username))
            .await
    }

    /// Resolve every username concurrently, one lookup task each.
    ///
    /// Returns one [`Resolution`] per input, in input order. A miss or a
    /// failed lookup leaves that slot unresolved without affecting the
    /// other lookups.
    pub async fn resolve_many(&self, usernames: &[String]) -> Vec<Resolution> {
        let mut slots: Vec<Option<User>> = vec![None; usernames.len()];
        let mut lookups = JoinSet::new();

        for (index, username) in usernames.iter().enumerate() {
            let users = self.users.clone();
            let username = canonical_username(username);
            lookups.spawn(async move { (index, users.get_by_username(&username).await) });
        }

        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((index, Ok(user))) => slots[index] = Some(user),
                Ok((index, Err(err))) if !err.is_not_found() => {
                    warn!(username = %usernames[index], error = %err, "Username lookup failed");
                }
                Ok(_) => {}
                Err(err) => warn!(error = %err, "Username lookup task did not complete"),
            }
        }

        usernames
            .iter()
            .cloned()
            .zip(slots)
            .map(|(username, user)| Resolution { username, user })
            .collect()
    }
}

//! SurrealDB implementation of [`GroupRepository`].
//!
//! Administrator and subscriber sets are arrays on the group record.
//! Additions use `array::union` so they are idempotent, and the final
//! administrator is protected by a `WHERE` guard on the same `UPDATE`
//! that removes an administrator.

use chrono::{DateTime, Utc};
use flock_core::error::FlockResult;
use flock_core::models::group::{Group, GroupPatch, NewGroup};
use flock_core::repository::GroupRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct GroupRow {
    username: String,
    screen_name: String,
    description: String,
    is_private: bool,
    administrators: Vec<String>,
    subscribers: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroupRow {
    fn try_into_group(self, id: Uuid) -> Result<Group, DbError> {
        Ok(Group {
            id,
            username: self.username,
            screen_name: self.screen_name,
            description: self.description,
            is_private: self.is_private,
            administrators: parse_ids(&self.administrators)?,
            subscribers: parse_ids(&self.subscribers)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct GroupRowWithId {
    record_id: String,
    username: String,
    screen_name: String,
    description: String,
    is_private: bool,
    administrators: Vec<String>,
    subscribers: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroupRowWithId {
    fn try_into_group(self) -> Result<Group, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid group UUID: {e}")))?;
        Ok(Group {
            id,
            username: self.username,
            screen_name: self.screen_name,
            description: self.description,
            is_private: self.is_private,
            administrators: parse_ids(&self.administrators)?,
            subscribers: parse_ids(&self.subscribers)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn parse_ids(raw: &[String]) -> Result<Vec<Uuid>, DbError> {
    raw.iter()
        .map(|s| {
            Uuid::parse_str(s).map_err(|e| DbError::Corrupt(format!("invalid member UUID: {e}")))
        })
        .collect()
}

/// SurrealDB implementation of the Group repository.
#[derive(Clone)]
pub struct SurrealGroupRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealGroupRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Union `user_id` into one of the membership arrays.
    async fn add_to_set(&self, field: &str, group_id: Uuid, user_id: Uuid) -> FlockResult<()> {
        let group_id_str = group_id.to_string();
        let query = format!(
            "UPDATE type::record('group', $id) \
             SET {field} = array::union({field}, [$user_id])"
        );

        let result = self
            .db
            .query(query)
            .bind(("id", group_id_str.clone()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "group".into(),
                id: group_id_str,
            }
            .into());
        }

        debug!(group_id = %group_id, user_id = %user_id, field, "Added to group set");
        Ok(())
    }
}

impl<C: Connection> GroupRepository for SurrealGroupRepository<C> {
    async fn create(&self, input: NewGroup) -> FlockResult<Group> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let admin = input.first_administrator.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('group', $id) SET \
                 username = $username, screen_name = $screen_name, \
                 description = $description, is_private = $is_private, \
                 administrators = [$admin], subscribers = [$admin]",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", input.username.clone()))
            .bind(("screen_name", input.screen_name))
            .bind(("description", input.description))
            .bind(("is_private", input.is_private))
            .bind(("admin", admin))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement(e, "group", &input.username))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "group".into(),
            id: id_str,
        })?;

        debug!(
            group_id = %id,
            username = %input.username,
            owner = %input.first_administrator,
            "Created group"
        );
        Ok(row.try_into_group(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> FlockResult<Group> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('group', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "group".into(),
            id: id_str,
        })?;

        Ok(row.try_into_group(id)?)
    }

    async fn get_by_username(&self, username: &str) -> FlockResult<Group> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM group \
                 WHERE username = $username",
            )
            .bind(("username", username.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GroupRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "group".into(),
            id: format!("username={username}"),
        })?;

        Ok(row.try_into_group()?)
    }

    async fn update(&self, id: Uuid, patch: GroupPatch) -> FlockResult<Group> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if patch.screen_name.is_some() {
            sets.push("screen_name = $screen_name");
        }
        if patch.description.is_some() {
            sets.push("description = $description");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('group', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(screen_name) = patch.screen_name {
            builder = builder.bind(("screen_name", screen_name));
        }
        if let Some(description) = patch.description {
            builder = builder.bind(("description", description));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "group".into(),
            id: id_str,
        })?;

        Ok(row.try_into_group(id)?)
    }

    async fn add_administrator(&self, group_id: Uuid, user_id: Uuid) -> FlockResult<()> {
        self.add_to_set("administrators", group_id, user_id).await
    }

    async fn remove_administrator(&self, group_id: Uuid, user_id: Uuid) -> FlockResult<()> {
        let group_id_str = group_id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('group', $id) \
                 SET administrators = array::complement(administrators, [$user_id]) \
                 WHERE array::len(array::complement(administrators, [$user_id])) > 0",
            )
            .bind(("id", group_id_str.clone()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            // The guard rejected the update, or the group does not exist.
            self.get_by_id(group_id).await?;
            return Err(DbError::LastAdministrator {
                group_id: group_id_str,
            }
            .into());
        }

        debug!(group_id = %group_id, user_id = %user_id, "Removed administrator");
        Ok(())
    }

    async fn add_subscriber(&self, group_id: Uuid, user_id: Uuid) -> FlockResult<()> {
        self.add_to_set("subscribers", group_id, user_id).await
    }
}

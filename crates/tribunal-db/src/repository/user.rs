//! SurrealDB implementation of [`UserRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use tribunal_core::error::TribunalResult;
use tribunal_core::models::user::{UpsertUser, User};
use tribunal_core::repository::UserRepository;
use uuid::Uuid;

use super::{parse_uuid, parse_wire};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    discord_id: String,
    display_name: String,
    avatar: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row shape for statements where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    discord_id: String,
    display_name: String,
    avatar: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            discord_id: self.discord_id,
            display_name: self.display_name,
            avatar: self.avatar,
            role: parse_wire("user role", &self.role)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        UserRow {
            discord_id: self.discord_id,
            display_name: self.display_name,
            avatar: self.avatar,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user(parse_uuid("user id", &self.record_id)?)
    }
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find_by_discord_id(&self, discord_id: &str) -> Result<Option<User>, DbError> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM user WHERE discord_id = $discord_id")
            .bind(("discord_id", discord_id.to_string()))
            .await?;

        let rows: Vec<UserRowWithId> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(UserRowWithId::try_into_user)
            .transpose()
    }

    async fn insert(&self, input: &UpsertUser) -> Result<User, DbError> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 discord_id = $discord_id, \
                 display_name = $display_name, \
                 avatar = $avatar, \
                 role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("discord_id", input.discord_id.clone()))
            .bind(("display_name", input.display_name.clone()))
            .bind(("avatar", input.avatar.clone()))
            .bind(("role", input.role.as_str().to_string()))
            .await?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("user", &input.discord_id, e))?;

        let rows: Vec<UserRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("user", id_str))?
            .into_user(id)
    }

    async fn overwrite(&self, id: Uuid, input: &UpsertUser) -> Result<User, DbError> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('user', $id) SET \
                 display_name = $display_name, \
                 avatar = $avatar, \
                 role = $role, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("display_name", input.display_name.clone()))
            .bind(("avatar", input.avatar.clone()))
            .bind(("role", input.role.as_str().to_string()))
            .await?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("user", &id_str, e))?;

        let rows: Vec<UserRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("user", id_str))?
            .into_user(id)
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn get_by_id(&self, id: Uuid) -> TribunalResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM type::record('user', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("user", id_str))?;

        Ok(row.try_into_user()?)
    }

    async fn get_by_discord_id(&self, discord_id: &str) -> TribunalResult<User> {
        self.find_by_discord_id(discord_id)
            .await?
            .ok_or_else(|| DbError::not_found("user", format!("discord_id={discord_id}")).into())
    }

    async fn upsert(&self, input: UpsertUser) -> TribunalResult<User> {
        if let Some(existing) = self.find_by_discord_id(&input.discord_id).await? {
            return Ok(self.overwrite(existing.id, &input).await?);
        }

        match self.insert(&input).await {
            Ok(user) => Ok(user),
            // Created concurrently by another login.
            Err(DbError::Duplicate { .. }) => {
                debug!(discord_id = %input.discord_id, "user created concurrently, updating");
                let existing = self
                    .find_by_discord_id(&input.discord_id)
                    .await?
                    .ok_or_else(|| DbError::not_found("user", &input.discord_id))?;
                Ok(self.overwrite(existing.id, &input).await?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

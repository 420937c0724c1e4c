// src/users/store.rs
//! SQLite-backed user storage

use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{User, UserChanges};
use crate::auth::UserLookup;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn map_write_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Database(e),
    }
}

#[derive(Debug, Clone)]
pub struct UserStore {
    db: SqlitePool,
}

impl UserStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.db)
        .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.db)
            .await
    }

    /// Whether `email` belongs to an account other than `except_id`
    pub async fn email_taken(
        &self,
        email: &str,
        except_id: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE email = ? AND id != COALESCE(?, '')",
        )
        .bind(email)
        .bind(except_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count > 0)
    }

    /// Insert a user whose password is already hashed
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, created_at)
            VALUES (?, ?, ?, ?, datetime('now'))
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .execute(&self.db)
        .await
        .map_err(map_write_error)?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(&id)
            .fetch_one(&self.db)
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Apply `changes`; `Ok(None)` when no such user exists
    pub async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, StoreError> {
        if changes.is_empty() {
            debug!(user_id = %id, "Empty update, returning current record");
            return Ok(self.get_by_id(id).await?);
        }

        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE(?, email),
                name = COALESCE(?, name),
                password_hash = COALESCE(?, password_hash),
                updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(changes.email.as_deref())
        .bind(changes.name.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!(user_id = %id, "User updated");
        Ok(self.get_by_id(id).await?)
    }

    /// Remove a user; `false` when no such user exists
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(user_id = %id, "User deleted");
        }
        Ok(deleted)
    }
}

#[async_trait]
impl UserLookup for UserStore {
    async fn by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        self.get_by_email(email).await
    }

    async fn by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        self.get_by_id(id).await
    }
}

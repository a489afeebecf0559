//! Users database repository (used by AuthService; password hashes handled here)

use anyhow::Result;
use sqlx::SqlitePool;

use crate::db::sqlite_helpers::now_iso8601;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

const USER_COLUMNS: &str =
    "id, username, password_hash, is_active, last_login_at, created_at, updated_at";

/// Users repository
pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE id = ?1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE username = ?1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Insert a new active user
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<UserRecord> {
        let now = now_iso8601();
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (username, password_hash, is_active, last_login_at, created_at, updated_at)
            VALUES (?1, ?2, 1, NULL, ?3, ?3)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(username)
        .bind(password_hash)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Replace a user's password hash
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET password_hash = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(password_hash)
            .bind(now_iso8601())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Activate or deactivate a user
    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET is_active = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(is_active)
            .bind(now_iso8601())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Update a user's last login timestamp
    pub async fn update_last_login(&self, id: i64) -> Result<u64> {
        let now = now_iso8601();
        let result = sqlx::query("UPDATE users SET last_login_at = ?1, updated_at = ?1 WHERE id = ?2")
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Key/value store for generated secrets. Never exposed via GraphQL.
pub struct AuthSecretsRepository {
    pool: SqlitePool,
}

impl AuthSecretsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read a secret
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM auth_secrets WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Store a secret, replacing any previous value
    pub async fn put(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO auth_secrets (key, value) VALUES (?1, ?2)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

//! Authentication service for credential checks and token handling
//!
//! Provides:
//! - Password hashing with bcrypt
//! - Token issuance for `/api/token-auth/`
//! - Token validation for every GraphQL request
//! - Signing secret bootstrap (configured, or generated once and stored)

use std::sync::Arc;

use anyhow::{Context, anyhow};
use base64::Engine;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::{Database, UserRecord};

/// Key used to store the generated signing secret in auth_secrets
const AUTH_SECRETS_JWT_KEY: &str = "jwt_secret";

// ============================================================================
// Claims
// ============================================================================

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID (subject)
    pub sub: String,
    /// Username
    pub username: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// The user a validated token belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUser {
    pub user_id: i64,
    pub username: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unable to log in with provided credentials.")]
    InvalidCredentials,
    #[error("Invalid token.")]
    InvalidToken,
    #[error("User inactive or deleted.")]
    InactiveUser,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

// ============================================================================
// Configuration
// ============================================================================

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Signing secret; generated and stored in the database when `None`
    pub jwt_secret: Option<String>,
    /// Token lifetime in seconds
    pub token_lifetime_secs: i64,
    /// Bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_lifetime_secs: config.token_lifetime_secs,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

// ============================================================================
// Auth Service
// ============================================================================

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    secret: Arc<String>,
    token_lifetime_secs: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create the service, resolving the signing secret first
    pub async fn initialize(db: Database, config: AuthConfig) -> anyhow::Result<Self> {
        let secret = match config.jwt_secret {
            Some(secret) => secret,
            None => load_or_generate_secret(&db).await?,
        };

        Ok(Self {
            db,
            secret: Arc::new(secret),
            token_lifetime_secs: config.token_lifetime_secs,
            bcrypt_cost: config.bcrypt_cost,
        })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Hash a password off the async runtime
    pub async fn hash_password(&self, password: &str) -> anyhow::Result<String> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("Password hashing task failed")?
            .context("Failed to hash password")
    }

    /// Create a user, or reset the password of an existing one
    pub async fn upsert_user(&self, username: &str, password: &str) -> anyhow::Result<UserRecord> {
        let users = self.db.users();
        let password_hash = self.hash_password(password).await?;

        if let Some(existing) = users.get_by_username(username).await? {
            users.update_password(existing.id, &password_hash).await?;
            info!(user_id = existing.id, username, "Password reset");
            return users
                .get_by_id(existing.id)
                .await?
                .ok_or_else(|| anyhow!("User disappeared during password reset"));
        }

        let user = users.create(username, &password_hash).await?;
        info!(user_id = user.id, username, "User created");
        Ok(user)
    }

    /// Create a user only if the username is free. Returns whether one was created.
    pub async fn ensure_user(&self, username: &str, password: &str) -> anyhow::Result<bool> {
        if self.db.users().get_by_username(username).await?.is_some() {
            return Ok(false);
        }
        self.upsert_user(username, password).await?;
        Ok(true)
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    /// Exchange a username and password for a token
    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let users = self.db.users();
        let Some(user) = users.get_by_username(username).await? else {
            debug!(username, "Login attempt for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("Password verification task failed")?
            .unwrap_or(false);

        if !matches || !user.is_active {
            debug!(user_id = user.id, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        users.update_last_login(user.id).await?;
        self.issue_token(&user)
    }

    /// Sign a token for a user
    pub fn issue_token(&self, user: &UserRecord) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_lifetime_secs)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(anyhow!("Failed to sign token: {}", e)))
    }

    /// Check signature and expiry. Does not touch the database.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "Token verification failed");
            AuthError::InvalidToken
        })
    }

    /// Validate a token and make sure its user still exists and is active
    pub async fn authenticate(&self, token: &str) -> Result<TokenUser, AuthError> {
        let claims = self.verify_token(token)?;
        let user_id: i64 = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

        match self.db.users().get_by_id(user_id).await? {
            Some(user) if user.is_active => Ok(TokenUser {
                user_id: user.id,
                username: user.username,
            }),
            _ => Err(AuthError::InactiveUser),
        }
    }
}

/// Read the stored signing secret, generating and storing one if missing or blank
async fn load_or_generate_secret(db: &Database) -> anyhow::Result<String> {
    let secrets = db.auth_secrets();
    if let Some(value) = secrets.get(AUTH_SECRETS_JWT_KEY).await?
        && !value.trim().is_empty()
    {
        return Ok(value);
    }

    let secret = generate_secret();
    secrets.put(AUTH_SECRETS_JWT_KEY, &secret).await?;
    info!("JWT secret generated and stored in database");
    Ok(secret)
}

fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service(secret: Option<&str>) -> AuthService {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        AuthService::initialize(
            db,
            AuthConfig {
                jwt_secret: secret.map(str::to_string),
                token_lifetime_secs: 3600,
                bcrypt_cost: 4,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_obtain_and_authenticate() {
        let auth = service(Some("secret")).await;
        auth.upsert_user("chef", "hunter2").await.unwrap();

        let token = auth.obtain_token("chef", "hunter2").await.unwrap();
        let user = auth.authenticate(&token).await.unwrap();
        assert_eq!(user.username, "chef");
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let auth = service(Some("secret")).await;
        auth.upsert_user("chef", "hunter2").await.unwrap();

        assert!(matches!(
            auth.obtain_token("chef", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.obtain_token("nobody", "hunter2").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = service(Some("one")).await;
        let user = issuer.upsert_user("chef", "pw").await.unwrap();
        let token = issuer.issue_token(&user).unwrap();

        let verifier = service(Some("two")).await;
        assert!(matches!(verifier.verify_token(&token), Err(AuthError::InvalidToken)));
        assert!(matches!(verifier.verify_token("garbage"), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_inactive_user_is_rejected() {
        let auth = service(Some("secret")).await;
        let user = auth.upsert_user("chef", "pw").await.unwrap();
        let token = auth.issue_token(&user).unwrap();

        auth.db.users().set_active(user.id, false).await.unwrap();

        assert!(matches!(auth.authenticate(&token).await, Err(AuthError::InactiveUser)));
        assert!(matches!(
            auth.obtain_token("chef", "pw").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_generated_secret_is_persisted() {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();

        let first = load_or_generate_secret(&db).await.unwrap();
        let second = load_or_generate_secret(&db).await.unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_user_does_not_reset_password() {
        let auth = service(Some("secret")).await;
        assert!(auth.ensure_user("admin", "first").await.unwrap());
        assert!(!auth.ensure_user("admin", "second").await.unwrap());
        assert!(auth.obtain_token("admin", "first").await.is_ok());
    }
}

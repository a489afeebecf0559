//! GraphQL authentication
//!
//! The HTTP handler validates the `Authorization` header before execution and
//! attaches an [`AuthUser`] to the request data. Root resolvers call
//! [`AuthExt::auth_user`] before doing any work.

use async_graphql::{Context, ErrorExtensions, Result};

use super::errors::ApiError;
use crate::services::auth::TokenUser;

/// The authenticated caller of a GraphQL request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

impl From<TokenUser> for AuthUser {
    fn from(user: TokenUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
        }
    }
}

/// Extension trait to get authenticated user from GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>().ok_or_else(|| {
            ApiError::Unauthenticated("Authentication credentials were not provided.".to_string())
                .extend()
        })
    }
}

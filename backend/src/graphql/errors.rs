//! Error type for GraphQL resolvers
//!
//! Every failure a client can see goes through [`ApiError`], which carries an
//! `extensions.code` so clients can branch without parsing messages.

use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{label} is invalid.")]
    InvalidId { label: String },

    #[error("Invalid node type for {label}. Expected '{expected}', got '{actual}'.")]
    WrongNodeType {
        label: String,
        expected: &'static str,
        actual: String,
    },

    #[error("{label} not found.")]
    NotFound { label: String },

    #[error("{0}")]
    Validation(String),

    #[error("Cursor '{0}' is invalid.")]
    InvalidCursor(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::InvalidId { .. }
            | ApiError::WrongNodeType { .. }
            | ApiError::Validation(_)
            | ApiError::InvalidCursor(_) => "BAD_USER_INPUT",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        if let ApiError::Internal(source) = self {
            tracing::error!(error = ?source, "Resolver failed");
        }
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

/// Converts a fallible result into a GraphQL result that keeps the error code.
///
/// `?` alone would go through async-graphql's `Display` conversion and drop the code.
pub trait GqlResultExt<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T, E> GqlResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().extend())
    }
}

//! Recipebook backend: a GraphQL API over ingredients and recipes.
//!
//! All reads and writes go through GraphQL at `/graphql/`; tokens are issued
//! at `/api/token-auth/`.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;

pub use app::{AppState, build_app};

//! GraphQL API over ingredients and recipes
//!
//! Built with async-graphql. Queries and mutations live in per-domain modules
//! under `queries/` and `mutations/` and are merged into the roots in `schema.rs`.

pub mod auth;
pub mod errors;
pub mod handler;
pub mod helpers;
pub mod loaders;
pub mod mutations;
pub mod pagination;
pub mod queries;
pub mod relay;
mod schema;
pub mod types;

pub use auth::AuthUser;
pub use schema::{RecipeBookSchema, SchemaSettings, build_schema};

//! REST route definitions
//!
//! The primary API is GraphQL at /graphql/. REST covers what sits outside it:
//! token issuance and health probes.

pub mod health;
pub mod token_auth;

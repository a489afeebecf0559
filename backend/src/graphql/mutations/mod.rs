pub mod ingredients;
pub mod recipes;

pub use ingredients::IngredientMutations;
pub use recipes::RecipeMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ID, Object, Result};
    pub(crate) use tracing::info;

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::errors::{ApiError, GqlResultExt};
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}

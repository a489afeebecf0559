pub mod ingredients;
pub mod node;
pub mod recipes;

pub use ingredients::IngredientQueries;
pub use node::NodeQueries;
pub use recipes::RecipeQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ID, Object, Result};

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::errors::GqlResultExt;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::pagination::ConnectionArgs;
    pub(crate) use crate::graphql::types::*;
}

use super::prelude::*;
use crate::graphql::errors::ApiError;
use crate::graphql::relay::{INGREDIENT_TYPE, RECIPE_TYPE, from_global_id};

#[derive(Default)]
pub struct NodeQueries;

#[Object]
impl NodeQueries {
    /// Fetch any object by its global ID. Returns null when the row is gone.
    async fn node(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Node>> {
        ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let invalid = || ApiError::InvalidId {
            label: "ID".to_string(),
        };
        let (type_name, raw_id) = from_global_id(&id).ok_or_else(invalid).gql()?;
        let row_id: i64 = raw_id.parse().map_err(|_| invalid()).gql()?;

        let node = match type_name.as_str() {
            INGREDIENT_TYPE => db
                .ingredients()
                .get_by_id(row_id)
                .await
                .gql()?
                .map(|r| Node::Ingredient(r.into())),
            RECIPE_TYPE => db
                .recipes()
                .get_by_id(row_id)
                .await
                .gql()?
                .map(|r| Node::Recipe(r.into())),
            other => {
                return Err(ApiError::Validation(format!("Unknown node type '{}'.", other)))
                    .gql();
            }
        };

        Ok(node)
    }
}

use super::prelude::*;

#[derive(Default)]
pub struct IngredientQueries;

#[Object]
impl IngredientQueries {
    /// List ingredients in insertion order
    #[allow(clippy::too_many_arguments)]
    async fn all_ingredients(
        &self,
        ctx: &Context<'_>,
        offset: Option<i32>,
        before: Option<String>,
        after: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        name: Option<String>,
        #[graphql(name = "name_Icontains")] name_icontains: Option<String>,
        #[graphql(name = "name_Istartswith")] name_istartswith: Option<String>,
    ) -> Result<IngredientTypeConnection> {
        ctx.auth_user()?;

        let args = ConnectionArgs {
            first,
            last,
            after,
            before,
            offset,
        };
        let filter = IngredientFilterArgs {
            name,
            name_icontains,
            name_istartswith,
        }
        .into_filter();

        ingredient_connection(ctx, args, filter).await
    }

    /// Get a single ingredient by global ID
    async fn ingredient(&self, ctx: &Context<'_>, id: ID) -> Result<Ingredient> {
        ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let record = fetch_ingredient(db, &id, "Ingredient ID").await.gql()?;
        Ok(Ingredient::from(record))
    }
}

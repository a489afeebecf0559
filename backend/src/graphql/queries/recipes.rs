use super::prelude::*;

#[derive(Default)]
pub struct RecipeQueries;

#[Object]
impl RecipeQueries {
    /// List recipes in insertion order
    #[allow(clippy::too_many_arguments)]
    async fn all_recipes(
        &self,
        ctx: &Context<'_>,
        offset: Option<i32>,
        before: Option<String>,
        after: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        title: Option<String>,
        #[graphql(name = "title_Icontains")] title_icontains: Option<String>,
        #[graphql(name = "title_Istartswith")] title_istartswith: Option<String>,
        #[graphql(name = "ingredients_Name_Icontains")]
        ingredients_name_icontains: Option<String>,
    ) -> Result<RecipeTypeConnection> {
        ctx.auth_user()?;

        let args = ConnectionArgs {
            first,
            last,
            after,
            before,
            offset,
        };
        let filter = RecipeFilterArgs {
            title,
            title_icontains,
            title_istartswith,
            ingredients_name_icontains,
        }
        .into_filter();

        recipe_connection(ctx, args, filter).await
    }

    /// Get a single recipe by global ID
    async fn recipe(&self, ctx: &Context<'_>, id: ID) -> Result<Recipe> {
        ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let record = fetch_recipe(db, &id, "Recipe ID").await.gql()?;
        Ok(Recipe::from(record))
    }
}

use super::prelude::*;

#[derive(Default)]
pub struct RecipeMutations;

/// Reject a missing or empty ingredient list with `message`
fn require_ingredient_ids(
    ingredient_ids: Option<Vec<Option<ID>>>,
    message: &str,
) -> Result<Vec<Option<ID>>, ApiError> {
    match ingredient_ids {
        Some(ids) if !ids.is_empty() => Ok(ids),
        _ => Err(ApiError::Validation(message.to_string())),
    }
}

const EMPTY_LIST_ON_CHANGE: &str = "At least one ingredient ID must be provided.";

#[Object]
impl RecipeMutations {
    /// Create a recipe with an initial set of ingredients
    async fn create_recipe(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Title of the new recipe.")] title: String,
        #[graphql(desc = "List of global IDs for ingredients.")]
        ingredient_ids: Option<Vec<Option<ID>>>,
    ) -> Result<CreateRecipePayload> {
        let user = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let global_ids = require_ingredient_ids(
            ingredient_ids,
            "At least one ingredient is required to create a recipe.",
        )
        .gql()?;
        let ids = resolve_ingredient_ids(db, &global_ids).await.gql()?;
        let title = validate_char_field(&title).gql()?;

        let record = db.recipes().create(&title, &ids).await.gql()?;

        info!(
            recipe_id = record.id,
            ingredients = ids.len(),
            user_id = user.user_id,
            "Recipe created"
        );
        Ok(CreateRecipePayload {
            recipe: record.into(),
        })
    }

    /// Add ingredients to a recipe. Ingredients already attached are left as they are.
    async fn add_ingredients_to_recipe(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Global ID of the recipe.")] recipe_id: ID,
        #[graphql(desc = "List of global IDs for ingredients to add.")]
        ingredient_ids: Option<Vec<Option<ID>>>,
    ) -> Result<AddIngredientsToRecipePayload> {
        let user = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let global_ids = require_ingredient_ids(ingredient_ids, EMPTY_LIST_ON_CHANGE).gql()?;
        let recipe = fetch_recipe(db, &recipe_id, "Recipe ID").await.gql()?;
        let ids = resolve_ingredient_ids(db, &global_ids).await.gql()?;

        let added = db.recipes().add_ingredients(recipe.id, &ids).await.gql()?;

        info!(recipe_id = recipe.id, added, user_id = user.user_id, "Ingredients added to recipe");
        Ok(AddIngredientsToRecipePayload {
            recipe: recipe.into(),
        })
    }

    /// Remove ingredients from a recipe. Ingredients not attached are ignored.
    async fn remove_ingredients_from_recipe(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Global ID of the recipe.")] recipe_id: ID,
        #[graphql(desc = "List of global IDs for ingredients to remove.")]
        ingredient_ids: Option<Vec<Option<ID>>>,
    ) -> Result<RemoveIngredientsFromRecipePayload> {
        let user = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let global_ids = require_ingredient_ids(ingredient_ids, EMPTY_LIST_ON_CHANGE).gql()?;
        let recipe = fetch_recipe(db, &recipe_id, "Recipe ID").await.gql()?;
        let ids = resolve_ingredient_ids(db, &global_ids).await.gql()?;

        let removed = db.recipes().remove_ingredients(recipe.id, &ids).await.gql()?;

        info!(
            recipe_id = recipe.id,
            removed,
            user_id = user.user_id,
            "Ingredients removed from recipe"
        );
        Ok(RemoveIngredientsFromRecipePayload {
            recipe: recipe.into(),
        })
    }
}

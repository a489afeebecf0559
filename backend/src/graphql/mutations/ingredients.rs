use super::prelude::*;

#[derive(Default)]
pub struct IngredientMutations;

#[Object]
impl IngredientMutations {
    /// Create a new ingredient
    async fn create_ingredient(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> Result<CreateIngredientPayload> {
        let user = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let name = validate_char_field(&name).gql()?;
        let record = db.ingredients().create(&name).await.gql()?;

        info!(ingredient_id = record.id, user_id = user.user_id, "Ingredient created");
        Ok(CreateIngredientPayload {
            ingredient: record.into(),
        })
    }

    /// Rename an existing ingredient
    async fn update_ingredient(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
    ) -> Result<UpdateIngredientPayload> {
        let user = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let existing = fetch_ingredient(db, &id, "Ingredient ID").await.gql()?;
        let name = validate_char_field(&name).gql()?;

        let record = db
            .ingredients()
            .update(existing.id, &name)
            .await
            .gql()?
            .ok_or_else(|| ApiError::NotFound {
                label: "Ingredient ID".to_string(),
            })
            .gql()?;

        info!(ingredient_id = record.id, user_id = user.user_id, "Ingredient updated");
        Ok(UpdateIngredientPayload {
            ingredient: record.into(),
        })
    }

    /// Delete an ingredient and remove it from every recipe
    async fn delete_ingredient(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "The global ID of the ingredient to delete.")] id: ID,
    ) -> Result<DeleteIngredientPayload> {
        let user = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let existing = fetch_ingredient(db, &id, "Ingredient ID").await.gql()?;
        let success = db.ingredients().delete(existing.id).await.gql()?;

        info!(ingredient_id = existing.id, user_id = user.user_id, "Ingredient deleted");
        Ok(DeleteIngredientPayload { success })
    }
}

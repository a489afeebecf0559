//! GraphQL object types
//!
//! `IngredientType` and `RecipeType` implement the Relay `Node` interface and
//! expose their side of the many-to-many relation as filterable connections.

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, ErrorExtensions, Interface, Object, Result, SimpleObject, ID};

use super::errors::ApiError;
use super::helpers::{
    IngredientFilterArgs, RecipeFilterArgs, ingredient_connection, recipe_connection,
};
use super::loaders::IngredientCountLoader;
use super::pagination::ConnectionArgs;
use super::relay::{INGREDIENT_TYPE, RECIPE_TYPE, to_global_id};
use crate::db::{IngredientRecord, RecipeRecord};

// ============================================================================
// Node
// ============================================================================

/// An object with an ID
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID", desc = "The ID of the object"))]
pub enum Node {
    Ingredient(Ingredient),
    Recipe(Recipe),
}

// ============================================================================
// Ingredient
// ============================================================================

#[derive(Debug, Clone)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
}

impl From<IngredientRecord> for Ingredient {
    fn from(r: IngredientRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

#[Object(name = "IngredientType")]
impl Ingredient {
    /// The ID of the object
    async fn id(&self) -> ID {
        to_global_id(INGREDIENT_TYPE, self.id)
    }

    async fn name(&self) -> &str {
        &self.name
    }

    /// Recipes that use this ingredient
    #[allow(clippy::too_many_arguments)]
    async fn recipes(
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
        let args = ConnectionArgs {
            first,
            last,
            after,
            before,
            offset,
        };
        let mut filter = RecipeFilterArgs {
            title,
            title_icontains,
            title_istartswith,
            ingredients_name_icontains,
        }
        .into_filter();
        filter.ingredient_id = Some(self.id);

        recipe_connection(ctx, args, filter).await
    }
}

// ============================================================================
// Recipe
// ============================================================================

#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
}

impl From<RecipeRecord> for Recipe {
    fn from(r: RecipeRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
        }
    }
}

#[Object(name = "RecipeType")]
impl Recipe {
    /// The ID of the object
    async fn id(&self) -> ID {
        to_global_id(RECIPE_TYPE, self.id)
    }

    async fn title(&self) -> &str {
        &self.title
    }

    /// Ingredients used by this recipe
    #[allow(clippy::too_many_arguments)]
    async fn ingredients(
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
        let args = ConnectionArgs {
            first,
            last,
            after,
            before,
            offset,
        };
        let mut filter = IngredientFilterArgs {
            name,
            name_icontains,
            name_istartswith,
        }
        .into_filter();
        filter.recipe_id = Some(self.id);

        ingredient_connection(ctx, args, filter).await
    }

    /// Number of ingredients in this recipe
    async fn ingredient_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let loader = ctx.data_unchecked::<DataLoader<IngredientCountLoader>>();
        let count = loader
            .load_one(self.id)
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("{:#}", e)).extend())?;
        Ok(count.unwrap_or(0))
    }
}

// ============================================================================
// Connections
// ============================================================================

crate::define_connection!(IngredientTypeConnection, IngredientTypeEdge, Ingredient);
crate::define_connection!(RecipeTypeConnection, RecipeTypeEdge, Recipe);

// ============================================================================
// Mutation payloads
// ============================================================================

#[derive(SimpleObject)]
#[graphql(name = "CreateIngredient")]
pub struct CreateIngredientPayload {
    pub ingredient: Ingredient,
}

#[derive(SimpleObject)]
#[graphql(name = "UpdateIngredient")]
pub struct UpdateIngredientPayload {
    pub ingredient: Ingredient,
}

#[derive(SimpleObject)]
#[graphql(name = "DeleteIngredient")]
pub struct DeleteIngredientPayload {
    /// True if the ingredient was successfully deleted.
    pub success: bool,
}

#[derive(SimpleObject)]
#[graphql(name = "CreateRecipe")]
pub struct CreateRecipePayload {
    /// The newly created recipe object.
    pub recipe: Recipe,
}

#[derive(SimpleObject)]
#[graphql(name = "AddIngredientsToRecipe")]
pub struct AddIngredientsToRecipePayload {
    /// The updated recipe after adding ingredients.
    pub recipe: Recipe,
}

#[derive(SimpleObject)]
#[graphql(name = "RemoveIngredientsFromRecipe")]
pub struct RemoveIngredientsFromRecipePayload {
    /// The updated recipe after removing ingredients.
    pub recipe: Recipe,
}

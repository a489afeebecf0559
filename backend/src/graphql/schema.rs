//! Schema assembly
//!
//! Query and mutation roots are merged from per-domain objects, mirroring the
//! layout of `queries/` and `mutations/`.

use async_graphql::dataloader::DataLoader;
use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use super::loaders::IngredientCountLoader;
use super::mutations::{IngredientMutations, RecipeMutations};
use super::queries::{IngredientQueries, NodeQueries, RecipeQueries};
use crate::db::Database;

pub type RecipeBookSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(IngredientQueries, RecipeQueries, NodeQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(IngredientMutations, RecipeMutations);

/// Schema-wide settings available to resolvers as context data
#[derive(Debug, Clone, Copy)]
pub struct SchemaSettings {
    /// Largest `first`/`last` a connection accepts; also the default page size
    pub max_page_size: i32,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

/// Build the GraphQL schema with its context data
pub fn build_schema(db: Database, settings: SchemaSettings) -> RecipeBookSchema {
    let ingredient_counts = DataLoader::new(IngredientCountLoader::new(db.clone()), tokio::spawn);

    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(db)
    .data(settings)
    .data(ingredient_counts)
    .extension(Tracing)
    .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sdl_exposes_relay_names() {
        let db = Database::connect_in_memory().await.unwrap();
        let sdl = build_schema(db, SchemaSettings::default()).sdl();

        for expected in [
            "type IngredientType implements Node",
            "type RecipeType implements Node",
            "interface Node",
            "type IngredientTypeConnection",
            "type RecipeTypeEdge",
            "name_Icontains: String",
            "ingredients_Name_Icontains: String",
            "type CreateRecipe",
            "type RemoveIngredientsFromRecipe",
            "ingredientCount: Int!",
        ] {
            assert!(sdl.contains(expected), "SDL is missing `{}`", expected);
        }
    }
}

// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::{Context, ID, Result};

use super::errors::{ApiError, GqlResultExt};
use super::pagination::{Connection, ConnectionArgs};
use super::relay::{INGREDIENT_TYPE, RECIPE_TYPE, decode_id, ordinal_label};
use super::schema::SchemaSettings;
use super::types::{Ingredient, IngredientTypeConnection, Recipe, RecipeTypeConnection};
use crate::db::{
    Database, IngredientFilter, IngredientRecord, RecipeFilter, RecipeRecord, TextLookup,
};

/// Longest accepted ingredient name or recipe title, in characters
pub(crate) const MAX_CHAR_FIELD_LENGTH: usize = 100;

// ============================================================================
// Filters
// ============================================================================

/// Filter arguments accepted by ingredient connections
#[derive(Debug, Default)]
pub(crate) struct IngredientFilterArgs {
    pub name: Option<String>,
    pub name_icontains: Option<String>,
    pub name_istartswith: Option<String>,
}

impl IngredientFilterArgs {
    pub fn into_filter(self) -> IngredientFilter {
        IngredientFilter {
            name: TextLookup {
                exact: self.name,
                icontains: self.name_icontains,
                istartswith: self.name_istartswith,
            },
            recipe_id: None,
        }
    }
}

/// Filter arguments accepted by recipe connections
#[derive(Debug, Default)]
pub(crate) struct RecipeFilterArgs {
    pub title: Option<String>,
    pub title_icontains: Option<String>,
    pub title_istartswith: Option<String>,
    pub ingredients_name_icontains: Option<String>,
}

impl RecipeFilterArgs {
    pub fn into_filter(self) -> RecipeFilter {
        RecipeFilter {
            title: TextLookup {
                exact: self.title,
                icontains: self.title_icontains,
                istartswith: self.title_istartswith,
            },
            ingredient_name_icontains: self.ingredients_name_icontains,
            ingredient_id: None,
        }
    }
}

// ============================================================================
// Connections
// ============================================================================

/// Resolve an ingredient connection field. Errors name the field being resolved.
pub(crate) async fn ingredient_connection(
    ctx: &Context<'_>,
    args: ConnectionArgs,
    filter: IngredientFilter,
) -> Result<IngredientTypeConnection> {
    let db = ctx.data_unchecked::<Database>();
    let settings = ctx.data_unchecked::<SchemaSettings>();
    let repo = db.ingredients();

    let total = repo.count(&filter).await.gql()?;
    let window = args
        .window(total, settings.max_page_size, ctx.field().name())
        .gql()?;

    let records = if window.limit() > 0 {
        repo.list(&filter, window.start, window.limit()).await.gql()?
    } else {
        Vec::new()
    };
    let items: Vec<Ingredient> = records.into_iter().map(Ingredient::from).collect();

    Ok(IngredientTypeConnection::from_connection(
        Connection::from_window(items, &window),
    ))
}

/// Resolve a recipe connection field. Errors name the field being resolved.
pub(crate) async fn recipe_connection(
    ctx: &Context<'_>,
    args: ConnectionArgs,
    filter: RecipeFilter,
) -> Result<RecipeTypeConnection> {
    let db = ctx.data_unchecked::<Database>();
    let settings = ctx.data_unchecked::<SchemaSettings>();
    let repo = db.recipes();

    let total = repo.count(&filter).await.gql()?;
    let window = args
        .window(total, settings.max_page_size, ctx.field().name())
        .gql()?;

    let records = if window.limit() > 0 {
        repo.list(&filter, window.start, window.limit()).await.gql()?
    } else {
        Vec::new()
    };
    let items: Vec<Recipe> = records.into_iter().map(Recipe::from).collect();

    Ok(RecipeTypeConnection::from_connection(Connection::from_window(
        items, &window,
    )))
}

// ============================================================================
// IDs
// ============================================================================

/// Decode an ingredient global ID and load the row
pub(crate) async fn fetch_ingredient(
    db: &Database,
    global_id: &str,
    label: &str,
) -> Result<IngredientRecord, ApiError> {
    let id = decode_id(global_id, INGREDIENT_TYPE, label)?;
    db.ingredients()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            label: label.to_string(),
        })
}

/// Decode a recipe global ID and load the row
pub(crate) async fn fetch_recipe(
    db: &Database,
    global_id: &str,
    label: &str,
) -> Result<RecipeRecord, ApiError> {
    let id = decode_id(global_id, RECIPE_TYPE, label)?;
    db.recipes()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            label: label.to_string(),
        })
}

/// Resolve a list of ingredient global IDs to row ids, in order.
///
/// Each element is checked for existence; errors carry its position
/// ("Second Ingredient ID not found.").
pub(crate) async fn resolve_ingredient_ids(
    db: &Database,
    global_ids: &[Option<ID>],
) -> Result<Vec<i64>, ApiError> {
    let mut ids = Vec::with_capacity(global_ids.len());
    for (i, global_id) in global_ids.iter().enumerate() {
        let label = ordinal_label(i + 1, "Ingredient ID");
        let Some(global_id) = global_id else {
            return Err(ApiError::InvalidId { label });
        };
        ids.push(fetch_ingredient(db, global_id, &label).await?.id);
    }
    Ok(ids)
}

// ============================================================================
// Validation
// ============================================================================

/// Trim a name or title and check it is neither blank nor too long
pub(crate) fn validate_char_field(value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation("This field may not be blank.".to_string()));
    }
    if value.chars().count() > MAX_CHAR_FIELD_LENGTH {
        return Err(ApiError::Validation(format!(
            "Ensure this field has no more than {} characters.",
            MAX_CHAR_FIELD_LENGTH
        )));
    }
    Ok(value.to_string())
}

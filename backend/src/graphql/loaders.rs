//! GraphQL DataLoaders for batching database queries
//!
//! Resolving `ingredientCount` for every recipe in a page would issue one
//! query per recipe. The loader collects the recipe ids requested within the
//! same tick and answers them with a single grouped count.
//!
//! Loaders are created without a cache, so counts are read fresh on every
//! request, including right after a mutation in the same operation.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;

use crate::db::Database;

/// Batches ingredient counts by recipe id
pub struct IngredientCountLoader {
    db: Database,
}

impl IngredientCountLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<i64> for IngredientCountLoader {
    type Value = i64;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        tracing::trace!(batch = keys.len(), "Loading ingredient counts");
        self.db.recipes().ingredient_counts(keys).await.map_err(Arc::new)
    }
}

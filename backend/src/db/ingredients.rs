//! Ingredients database repository

use anyhow::Result;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::sqlite_helpers::TextLookup;

/// Ingredient record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct IngredientRecord {
    pub id: i64,
    pub name: String,
}

/// Filter for listing ingredients
#[derive(Debug, Clone, Default)]
pub struct IngredientFilter {
    /// Lookups on `name`
    pub name: TextLookup,
    /// Only ingredients attached to this recipe
    pub recipe_id: Option<i64>,
}

impl IngredientFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" WHERE 1 = 1");
        if let Some(recipe_id) = self.recipe_id {
            qb.push(" AND id IN (SELECT ingredient_id FROM recipe_ingredients WHERE recipe_id = ")
                .push_bind(recipe_id)
                .push(")");
        }
        self.name.push_conditions(qb, "name");
    }
}

/// Ingredient repository
pub struct IngredientRepository {
    pool: SqlitePool,
}

impl IngredientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count ingredients matching the filter
    pub async fn count(&self, filter: &IngredientFilter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM ingredients");
        filter.push_where(&mut qb);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// List a window of ingredients matching the filter, in insertion order
    pub async fn list(
        &self,
        filter: &IngredientFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<IngredientRecord>> {
        let mut qb = QueryBuilder::new("SELECT id, name FROM ingredients");
        filter.push_where(&mut qb);
        qb.push(" ORDER BY id ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let records = qb
            .build_query_as::<IngredientRecord>()
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    /// Get an ingredient by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<IngredientRecord>> {
        let record = sqlx::query_as::<_, IngredientRecord>(
            "SELECT id, name FROM ingredients WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Create an ingredient
    pub async fn create(&self, name: &str) -> Result<IngredientRecord> {
        let record = sqlx::query_as::<_, IngredientRecord>(
            "INSERT INTO ingredients (name) VALUES (?1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Rename an ingredient. Returns `None` when it does not exist.
    pub async fn update(&self, id: i64, name: &str) -> Result<Option<IngredientRecord>> {
        let record = sqlx::query_as::<_, IngredientRecord>(
            "UPDATE ingredients SET name = ?2 WHERE id = ?1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Delete an ingredient and its recipe memberships
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query("DELETE FROM recipe_ingredients WHERE ingredient_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM ingredients WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(ingredient_id = id, detached, "Deleted ingredient");
        Ok(deleted > 0)
    }
}

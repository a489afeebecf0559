//! Recipes database repository
//!
//! Manages recipes and their many-to-many membership in `recipe_ingredients`.
//! Membership writes use `INSERT OR IGNORE` / plain `DELETE`, so attaching a
//! present ingredient or detaching an absent one changes nothing.

use std::collections::HashMap;

use anyhow::Result;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::sqlite_helpers::{TextLookup, contains_pattern};

/// Recipe record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RecipeRecord {
    pub id: i64,
    pub title: String,
}

/// Filter for listing recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Lookups on `title`
    pub title: TextLookup,
    /// Recipes with at least one ingredient whose name contains this (case-insensitive)
    pub ingredient_name_icontains: Option<String>,
    /// Only recipes that use this ingredient
    pub ingredient_id: Option<i64>,
}

impl RecipeFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" WHERE 1 = 1");
        if let Some(ingredient_id) = self.ingredient_id {
            qb.push(" AND id IN (SELECT recipe_id FROM recipe_ingredients WHERE ingredient_id = ")
                .push_bind(ingredient_id)
                .push(")");
        }
        self.title.push_conditions(qb, "title");
        if let Some(needle) = &self.ingredient_name_icontains {
            qb.push(
                " AND EXISTS (SELECT 1 FROM recipe_ingredients ri \
                 JOIN ingredients i ON i.id = ri.ingredient_id \
                 WHERE ri.recipe_id = recipes.id AND i.name LIKE ",
            )
            .push_bind(contains_pattern(needle))
            .push(" ESCAPE '\\')");
        }
    }
}

/// Recipe repository
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count recipes matching the filter
    pub async fn count(&self, filter: &RecipeFilter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM recipes");
        filter.push_where(&mut qb);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// List a window of recipes matching the filter, in insertion order
    pub async fn list(
        &self,
        filter: &RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<RecipeRecord>> {
        let mut qb = QueryBuilder::new("SELECT id, title FROM recipes");
        filter.push_where(&mut qb);
        qb.push(" ORDER BY id ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let records = qb
            .build_query_as::<RecipeRecord>()
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    /// Get a recipe by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<RecipeRecord>> {
        let record =
            sqlx::query_as::<_, RecipeRecord>("SELECT id, title FROM recipes WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(record)
    }

    /// Create a recipe with its initial ingredient set in one transaction
    pub async fn create(&self, title: &str, ingredient_ids: &[i64]) -> Result<RecipeRecord> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, RecipeRecord>(
            "INSERT INTO recipes (title) VALUES (?1) RETURNING id, title",
        )
        .bind(title)
        .fetch_one(&mut *tx)
        .await?;

        for ingredient_id in ingredient_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO recipe_ingredients (recipe_id, ingredient_id) VALUES (?1, ?2)",
            )
            .bind(record.id)
            .bind(*ingredient_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(record)
    }

    /// Attach ingredients to a recipe. Returns how many memberships were new.
    pub async fn add_ingredients(&self, recipe_id: i64, ingredient_ids: &[i64]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut added = 0;

        for ingredient_id in ingredient_ids {
            added += sqlx::query(
                "INSERT OR IGNORE INTO recipe_ingredients (recipe_id, ingredient_id) VALUES (?1, ?2)",
            )
            .bind(recipe_id)
            .bind(*ingredient_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(added)
    }

    /// Detach ingredients from a recipe. Returns how many memberships existed.
    pub async fn remove_ingredients(&self, recipe_id: i64, ingredient_ids: &[i64]) -> Result<u64> {
        if ingredient_ids.is_empty() {
            return Ok(0);
        }

        let mut qb = QueryBuilder::new("DELETE FROM recipe_ingredients WHERE recipe_id = ");
        qb.push_bind(recipe_id).push(" AND ingredient_id IN (");
        let mut ids = qb.separated(", ");
        for ingredient_id in ingredient_ids {
            ids.push_bind(*ingredient_id);
        }
        ids.push_unseparated(")");

        let removed = qb.build().execute(&self.pool).await?.rows_affected();
        Ok(removed)
    }

    /// IDs of the ingredients attached to a recipe, ascending
    pub async fn ingredient_ids(&self, recipe_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT ingredient_id FROM recipe_ingredients WHERE recipe_id = ?1 ORDER BY ingredient_id",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Number of ingredients attached to each recipe. Every requested ID is present in the map.
    pub async fn ingredient_counts(&self, recipe_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        let mut counts: HashMap<i64, i64> = recipe_ids.iter().map(|id| (*id, 0)).collect();
        if recipe_ids.is_empty() {
            return Ok(counts);
        }

        let mut qb = QueryBuilder::new(
            "SELECT recipe_id, COUNT(*) FROM recipe_ingredients WHERE recipe_id IN (",
        );
        let mut ids = qb.separated(", ");
        for recipe_id in recipe_ids {
            ids.push_bind(*recipe_id);
        }
        ids.push_unseparated(") GROUP BY recipe_id");

        let rows: Vec<(i64, i64)> = qb.build_query_as().fetch_all(&self.pool).await?;
        counts.extend(rows);
        Ok(counts)
    }
}

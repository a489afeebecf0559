//! Schema creation at startup
//!
//! Every table is created with `CREATE TABLE IF NOT EXISTS`, so running the
//! sync against an existing database is a no-op. Column renames and type
//! changes are not handled.

use sqlx::SqlitePool;
use tracing::debug;

/// A table and the statements that create it (and its indexes)
struct TableDef {
    name: &'static str,
    statements: &'static [&'static str],
}

const TABLES: &[TableDef] = &[
    TableDef {
        name: "ingredients",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
        "#],
    },
    TableDef {
        name: "recipes",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL
            )
        "#],
    },
    TableDef {
        name: "recipe_ingredients",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients (ingredient_id)",
        ],
    },
    TableDef {
        name: "users",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                last_login_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#],
    },
    TableDef {
        name: "auth_secrets",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS auth_secrets (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
        "#],
    },
];

/// Result of a schema sync operation
#[derive(Debug, Default)]
pub struct SchemaSyncResult {
    pub tables_created: Vec<String>,
}

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Create any missing table
pub async fn sync_schema(pool: &SqlitePool) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut result = SchemaSyncResult::default();

    for table in TABLES {
        let existed = table_exists(pool, table.name).await?;
        for statement in table.statements {
            sqlx::query(statement).execute(pool).await?;
        }
        if !existed {
            debug!(table = table.name, "Created table");
            result.tables_created.push(table.name.to_string());
        }
    }

    Ok(result)
}

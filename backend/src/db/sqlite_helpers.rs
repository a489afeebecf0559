//! SQLite helper utilities for timestamps and text lookups
//!
//! Timestamps are stored as RFC 3339 TEXT. Case-insensitive lookups use `LIKE`
//! with an explicit escape character so user input never acts as a wildcard.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

// ============================================================================
// Timestamp Helpers (stored as ISO8601 TEXT in SQLite)
// ============================================================================

/// Get current UTC timestamp as ISO8601 string for SQLite
#[inline]
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339()
}

// ============================================================================
// Text Lookup Helpers
// ============================================================================

/// Escape `%`, `_` and the escape character itself for use in a `LIKE ... ESCAPE '\'` pattern
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `LIKE` pattern matching values that contain `input`
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}

/// `LIKE` pattern matching values that start with `input`
pub fn starts_with_pattern(input: &str) -> String {
    format!("{}%", escape_like(input))
}

/// Lookups supported on a text column: exact, contains and starts-with.
/// The last two are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLookup {
    pub exact: Option<String>,
    pub icontains: Option<String>,
    pub istartswith: Option<String>,
}

impl TextLookup {
    /// Append ` AND <column> ...` for each set lookup.
    /// The builder must already contain a `WHERE` clause.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Sqlite>, column: &str) {
        if let Some(exact) = &self.exact {
            qb.push(format!(" AND {} = ", column))
                .push_bind(exact.clone());
        }
        if let Some(needle) = &self.icontains {
            qb.push(format!(" AND {} LIKE ", column))
                .push_bind(contains_pattern(needle))
                .push(" ESCAPE '\\'");
        }
        if let Some(prefix) = &self.istartswith {
            qb.push(format!(" AND {} LIKE ", column))
                .push_bind(starts_with_pattern(prefix))
                .push(" ESCAPE '\\'");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("salt"), "salt");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_patterns() {
        assert_eq!(contains_pattern("tom"), "%tom%");
        assert_eq!(starts_with_pattern("tom"), "tom%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
    }

    #[test]
    fn test_push_conditions() {
        let lookup = TextLookup {
            exact: Some("Salt".to_string()),
            icontains: Some("al".to_string()),
            istartswith: None,
        };
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT id FROM t WHERE 1 = 1");
        lookup.push_conditions(&mut qb, "name");
        assert_eq!(
            qb.sql(),
            "SELECT id FROM t WHERE 1 = 1 AND name = ? AND name LIKE ? ESCAPE '\\'"
        );
    }
}
